//! A library for building composite multi-station seismogram grid files.
//!
//! A grid file is a fixed 60-byte header followed by a time-major body of
//! 4-byte float samples: for every time step, three component planes of
//! `nx*ny` values each. The crate creates zero-filled grid files from a
//! header template and inserts per-station three-component traces at their
//! grid coordinates, with a choice of two insertion strategies: buffer the
//! whole body in memory, or seek to every sample offset directly.

mod config;
mod header;
mod insert;
mod layout;
mod station;
mod swap;
mod trace;
mod tsgrid_error;
mod zerofill;

use std::fs::File;

pub use self::config::{CliArgs, Config, ConfigError, Mode, StationSpec};
pub use self::header::{TsHeader, TSHEADER_SIZE};
pub use self::insert::{read_body, select_engine, BufferedInsert, InsertEngine, SeekInsert};
pub use self::layout::{GridLayout, NUM_COMPONENTS};
pub use self::station::{StationEntry, StationList};
pub use self::swap::{swap_f32, swap_i32, swap_words_in_place};
pub use self::trace::{FlatTraceReader, TraceSource};
pub use self::tsgrid_error::TsGridError;
pub use self::zerofill::zero_fill;

/// Executes one configured run and returns the resolved grid header.
///
/// Zero-fill mode reads the header from the template file and writes a fresh
/// all-zero grid. Insert mode reads the header from the output grid itself,
/// then hands every station entry to the selected engine. In both modes the
/// header is read once, byte-swapped if requested, and any `nt`/`dt`
/// overrides are applied to the in-memory value; only zero-fill writes the
/// overridden header to disk.
pub fn run(config: &Config) -> Result<TsHeader, TsGridError> {
    match &config.mode {
        Mode::ZeroFill { in_tsfile } => {
            let head = read_run_header(in_tsfile, config)?;
            zero_fill(&config.out_tsfile, &head)?;
            Ok(head)
        }
        Mode::Insert { intmem, stations } => {
            let head = read_run_header(&config.out_tsfile, config)?;
            let list = match stations {
                StationSpec::List(path) => StationList::from_file(path)?,
                StationSpec::Single(entry) => StationList::single(entry.clone()),
            };
            let traces = FlatTraceReader {
                binary: config.inbin,
            };
            let mut engine = select_engine(*intmem, &config.out_tsfile);
            engine.insert(&head, list, &traces)?;
            Ok(head)
        }
    }
}

fn read_run_header(
    path: &std::path::Path,
    config: &Config,
) -> Result<TsHeader, TsGridError> {
    let mut file = File::open(path)?;
    let mut head = TsHeader::from_reader(&mut file)?;
    if config.swap_bytes {
        head = head.swapped();
    }
    Ok(head.with_overrides(config.nt, config.dt))
}
