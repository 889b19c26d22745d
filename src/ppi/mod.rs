mod build;
mod error;
pub(crate) mod graph;
mod parse;
mod path;
mod session;
mod store;

pub use build::collect_network;
pub use error::{NetworkError, NetworkResult};
pub use graph::{CENTER, Edge, EgoNetwork, NETWORK_SIZE, NetworkData, ScoreMatrix, Vertex};
pub use path::shortest_path;
pub use session::{
    DEFAULT_THRESHOLD, EdgeView, InteractionMode, LayoutUpdate, NetworkConfig, NetworkSession,
    NetworkView, PathStep, Selection, VertexView,
};
pub use store::{MemoryStore, ProteinInfo, ProteinLink, ProteinStore};
