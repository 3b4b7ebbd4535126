use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HgtError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("invalid tile name {0}")]
    TileName(PathBuf),

    #[error("unsupported tile size of {0} bytes for {1}")]
    TileLen(u64, PathBuf),
}
