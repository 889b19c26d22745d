use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::layout::DEFAULT_ITERATIONS;

use super::build::collect_network;
use super::error::{NetworkError, NetworkResult};
use super::graph::{CENTER, EgoNetwork, NetworkData};
use super::path::shortest_path;
use super::store::ProteinStore;

pub const DEFAULT_THRESHOLD: u32 = 400;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NetworkConfig {
    pub threshold: u32,
    pub iterations: usize,
    pub seed: Option<u64>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            iterations: DEFAULT_ITERATIONS,
            seed: None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InteractionMode {
    #[default]
    Inspect,
    Path,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PathStep {
    #[default]
    None,
    MidPointChosen,
    Showing,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selection {
    Inspected(Option<usize>),
    MidPoint(usize),
    FinalPoint(usize),
    Ignored,
}

/// Signals the presentation that new layout targets are available.
/// `restart_from_center` is set after a recenter, when every vertex should
/// travel out from the middle again instead of from its last position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayoutUpdate {
    pub revision: u64,
    pub restart_from_center: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VertexView {
    pub index: usize,
    pub id: String,
    pub name: String,
    pub size: String,
    pub annotation: String,
    pub position: [f32; 2],
    pub depth: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct EdgeView {
    pub a: usize,
    pub b: usize,
    pub weight: f32,
    pub highlighted: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct NetworkView {
    pub center: Option<String>,
    pub vertices: Vec<VertexView>,
    pub edges: Vec<EdgeView>,
    pub path: Vec<EdgeView>,
}

pub struct NetworkSession {
    store: Arc<dyn ProteinStore>,
    config: NetworkConfig,
    network: EgoNetwork,
    mode: InteractionMode,
    path_step: PathStep,
    mid_point: Option<usize>,
    final_point: Option<usize>,
    current_path: Vec<usize>,
    inspected: Option<usize>,
    layout_revision: u64,
    pending_update: Option<LayoutUpdate>,
}

impl NetworkSession {
    pub fn new(store: Arc<dyn ProteinStore>, config: NetworkConfig) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };

        Self {
            store,
            config,
            network: EgoNetwork::new(&mut rng),
            mode: InteractionMode::default(),
            path_step: PathStep::default(),
            mid_point: None,
            final_point: None,
            current_path: Vec::new(),
            inspected: None,
            layout_revision: 0,
            pending_update: None,
        }
    }

    pub fn store(&self) -> Arc<dyn ProteinStore> {
        Arc::clone(&self.store)
    }

    pub fn config(&self) -> NetworkConfig {
        self.config
    }

    pub fn network(&self) -> &EgoNetwork {
        &self.network
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn path_step(&self) -> PathStep {
        self.path_step
    }

    pub fn mid_point(&self) -> Option<usize> {
        self.mid_point
    }

    pub fn final_point(&self) -> Option<usize> {
        self.final_point
    }

    pub fn current_path(&self) -> &[usize] {
        &self.current_path
    }

    pub fn inspected(&self) -> Option<usize> {
        self.inspected
    }

    /// A failed build leaves the network, the path picks and the
    /// highlights exactly as they were.
    pub fn display_network(&mut self, protein_id: &str) -> NetworkResult<()> {
        let data = collect_network(self.store.as_ref(), protein_id, self.config.threshold)?;
        self.install(data, false);
        Ok(())
    }

    /// Like `display_network`, but tears the current network down first.
    /// The teardown only happens once the new data is complete.
    pub fn recenter(&mut self, protein_id: &str) -> NetworkResult<()> {
        let data = collect_network(self.store.as_ref(), protein_id, self.config.threshold)?;
        self.reset_network();
        self.install(data, true);
        Ok(())
    }

    pub fn recenter_on_inspected(&mut self) -> NetworkResult<()> {
        let Some(index) = self.inspected else {
            return Ok(());
        };
        let protein_id = self.network.vertices()[index].id.clone();
        self.inspected = None;
        self.recenter(&protein_id)
    }

    pub fn install(&mut self, data: NetworkData, restart_from_center: bool) {
        info!(
            center = data.center_id(),
            restart_from_center, "installing ego-network"
        );
        self.reset_path();
        self.inspected = None;
        self.network.populate(data);

        let report = self.network.layout(self.config.iterations);
        debug!(
            edges = self.network.edges().len(),
            iterations = report.temperatures.len(),
            final_step = report.max_displacements.last().copied().unwrap_or_default(),
            "layout computed"
        );

        self.layout_revision += 1;
        self.pending_update = Some(LayoutUpdate {
            revision: self.layout_revision,
            restart_from_center,
        });
    }

    pub fn reset_network(&mut self) {
        self.network.clear();
        self.current_path.clear();
        self.mid_point = None;
        self.final_point = None;
        self.path_step = PathStep::None;
        self.inspected = None;
        self.pending_update = None;
    }

    pub fn take_layout_update(&mut self) -> Option<LayoutUpdate> {
        self.pending_update.take()
    }

    pub fn set_mode(&mut self, mode: InteractionMode) {
        if mode == InteractionMode::Path {
            self.reset_path();
            self.inspected = None;
        }
        self.mode = mode;
    }

    pub fn on_vertex_selected(&mut self, index: usize) -> NetworkResult<Selection> {
        if !self.network.is_active() {
            return Err(NetworkError::InvalidSelection {
                index,
                reason: "no network is on display",
            });
        }
        if index >= self.network.vertices().len() {
            return Err(NetworkError::InvalidSelection {
                index,
                reason: "index outside the network",
            });
        }

        match self.mode {
            InteractionMode::Inspect => {
                self.inspected = if self.inspected == Some(index) {
                    None
                } else {
                    Some(index)
                };
                Ok(Selection::Inspected(self.inspected))
            }
            InteractionMode::Path => self.advance_path(index),
        }
    }

    fn advance_path(&mut self, index: usize) -> NetworkResult<Selection> {
        if self.path_step == PathStep::Showing {
            return Ok(Selection::Ignored);
        }

        if index == CENTER {
            warn!(index, "center cannot be a path endpoint");
            return Err(NetworkError::InvalidSelection {
                index,
                reason: "the center is always part of the route",
            });
        }

        match self.path_step {
            PathStep::None => {
                self.mid_point = Some(index);
                self.path_step = PathStep::MidPointChosen;
                Ok(Selection::MidPoint(index))
            }
            PathStep::MidPointChosen => {
                if self.mid_point == Some(index) {
                    warn!(index, "final point must differ from the midpoint");
                    return Err(NetworkError::InvalidSelection {
                        index,
                        reason: "already chosen as the midpoint",
                    });
                }
                self.final_point = Some(index);
                self.path_step = PathStep::Showing;
                Ok(Selection::FinalPoint(index))
            }
            PathStep::Showing => Ok(Selection::Ignored),
        }
    }

    pub fn on_path_trigger(&mut self) -> NetworkResult<&[usize]> {
        let (Some(mid_point), Some(final_point)) = (self.mid_point, self.final_point) else {
            return Err(NetworkError::IncompleteSelection);
        };

        let edges = match shortest_path(&self.network, mid_point, final_point) {
            Ok(edges) => edges,
            Err(error) => {
                warn!(%error, "path query failed");
                return Err(error);
            }
        };

        self.network.clear_highlights();
        self.network.highlight(&edges);
        self.current_path = edges;
        self.mode = InteractionMode::Inspect;
        Ok(&self.current_path)
    }

    pub fn reset_path(&mut self) {
        self.network.clear_highlights();
        self.current_path.clear();
        self.mid_point = None;
        self.final_point = None;
        self.path_step = PathStep::None;
    }

    pub fn view(&self) -> NetworkView {
        if !self.network.is_active() {
            return NetworkView::default();
        }

        let vertices = self
            .network
            .vertices()
            .iter()
            .enumerate()
            .map(|(index, vertex)| VertexView {
                index,
                id: vertex.id.clone(),
                name: vertex.name.clone(),
                size: vertex.size.clone(),
                annotation: vertex.annotation.clone(),
                position: [vertex.position.x, vertex.position.y],
                depth: vertex.depth,
            })
            .collect();

        let edge_view = |index: &usize| {
            let edge = self.network.edges()[*index];
            EdgeView {
                a: edge.a,
                b: edge.b,
                weight: edge.score,
                highlighted: edge.highlighted,
            }
        };
        let edges = (0..self.network.edges().len())
            .map(|index| edge_view(&index))
            .collect();
        let path = self.current_path.iter().map(edge_view).collect();

        NetworkView {
            center: Some(self.network.center().id.clone()),
            vertices,
            edges,
            path,
        }
    }
}
