use thiserror::Error;

pub type NetworkResult<T> = Result<T, NetworkError>;

#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("protein {center} has only {found} distinct partners, an ego-network needs 9")]
    InsufficientData { center: String, found: usize },

    #[error("protein {0} has no recorded interactions")]
    UnknownProtein(String),

    #[error("vertices {from} and {to} are not connected")]
    NotConnected { from: usize, to: usize },

    #[error("choose a midpoint and a final vertex before requesting a path")]
    IncompleteSelection,

    #[error("vertex {index} cannot be selected: {reason}")]
    InvalidSelection { index: usize, reason: &'static str },

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}
