use hgt::HgtError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LatticeError {
    #[error("missing required parameter '{0}'")]
    Builder(&'static str),

    #[error("at least 3 route points are required, got {0}")]
    InsufficientInput(usize),

    #[error("offset must be a positive number of meters")]
    Offset,

    #[error("no lattice row intersects the route")]
    Empty,

    #[error("lattice row {row} has one or zero points")]
    SparseRow { row: usize },

    #[error("edge point {col} of lattice row {row} is farther than the maximum offset from its neighbor")]
    EdgeGap { row: usize, col: usize },

    #[error("gap after point {col} of lattice row {row} is never bridged")]
    UnbridgedGap { row: usize, col: usize },

    #[error("no height files in {0}")]
    Path(PathBuf),

    #[error("no elevation sample at {0}")]
    Void(crate::Location),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Hgt(#[from] HgtError),
}

impl LatticeError {
    /// Returns `true` when no usable lattice exists for the requested
    /// route and offset.
    ///
    /// These errors are terminal for a request; callers should suggest
    /// a different route or offset rather than retry.
    pub fn is_generation_failure(&self) -> bool {
        matches!(
            self,
            Self::Empty | Self::SparseRow { .. } | Self::EdgeGap { .. } | Self::UnbridgedGap { .. }
        )
    }
}
