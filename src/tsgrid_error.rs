use std::path::PathBuf;
use thiserror::Error;

use crate::config::ConfigError;

#[derive(Error, Debug)]
pub enum TsGridError {
    #[error("IO Error")]
    IoError(#[from] std::io::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Insufficient bytes for grid header, {0} < header size {1}")]
    TruncatedHeader(usize, usize),
    #[error("grid dimensions must be positive, nx={nx} ny={ny} nz={nz} nt={nt}")]
    InvalidDimensions { nx: i32, ny: i32, nz: i32, nt: i32 },
    #[error("station ({ixp},{iyp}) outside grid of {nx} x {ny}")]
    StationOutOfBounds { ixp: i32, iyp: i32, nx: usize, ny: usize },
    #[error("cannot parse station list line {line_no}: `{line}`")]
    StationParse { line_no: usize, line: String },
    #[error("trace {path} has {got} samples but grid needs {need}")]
    TraceLengthMismatch { path: PathBuf, got: usize, need: usize },
    #[error("cannot parse sample `{token}` in trace {path}")]
    TraceParse { path: PathBuf, token: String },
}
