use std::convert::TryInto;
use std::fs;
use std::path::Path;

use crate::tsgrid_error::TsGridError;

/// The seam to the external single-component seismogram reader.
///
/// The full seismogram formats (headers, units, resampling) live outside this
/// crate; engines only need a flat sample array per component file. An
/// implementation may return more than `nt` samples, the insertion loop bound
/// truncates; fewer than `nt` is rejected by the engines.
pub trait TraceSource {
    fn read_trace(&self, path: &Path) -> Result<Vec<f32>, TsGridError>;
}

/// Reads component traces stored as flat sample files.
///
/// Binary mode is a raw native-endian f32 stream, text mode is
/// whitespace-separated decimal samples with `#` comment lines allowed.
#[derive(Debug, Clone, Copy)]
pub struct FlatTraceReader {
    pub binary: bool,
}

impl TraceSource for FlatTraceReader {
    fn read_trace(&self, path: &Path) -> Result<Vec<f32>, TsGridError> {
        if self.binary {
            let bytes = fs::read(path)?;
            let samples = bytes
                .chunks_exact(4)
                .map(|b| f32::from_ne_bytes(b.try_into().unwrap()))
                .collect();
            Ok(samples)
        } else {
            let text = fs::read_to_string(path)?;
            let mut samples = Vec::new();
            for line in text.lines() {
                if line.trim_start().starts_with('#') {
                    continue;
                }
                for token in line.split_whitespace() {
                    let v: f32 = token.parse().map_err(|_| TsGridError::TraceParse {
                        path: path.to_path_buf(),
                        token: token.to_string(),
                    })?;
                    samples.push(v);
                }
            }
            Ok(samples)
        }
    }
}
