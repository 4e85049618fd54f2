use clap::Parser;
use std::path::PathBuf;
use thiserror::Error;

use crate::station::StationEntry;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing mandatory parameter(s): {}", .0.join(", "))]
    MissingParameters(Vec<&'static str>),
}

/// The raw option surface, one flag per parameter of the original tool.
///
/// Everything is optional at the parser level; which parameters are
/// mandatory depends on the selected mode, so that logic lives in
/// [Config::from_args] where all missing parameters can be reported at once.
#[derive(Clone, Debug, PartialEq, Parser)]
#[clap(about, version)]
pub struct CliArgs {
    /// Target grid file.
    #[clap(long)]
    pub out_tsfile: Option<PathBuf>,
    /// Template grid file supplying the header for zero-fill mode.
    #[clap(long)]
    pub in_tsfile: Option<PathBuf>,
    /// Read component traces as binary rather than text.
    #[clap(long)]
    pub inbin: bool,
    /// Create a zero-filled grid file instead of inserting stations.
    #[clap(long)]
    pub zero_tsfile: bool,
    /// Byte-swap the grid header fields on read.
    #[clap(long)]
    pub swap_bytes: bool,
    /// Override the header's time-sample count.
    #[clap(long)]
    pub nt: Option<i32>,
    /// Override the header's sampling interval.
    #[clap(long)]
    pub dt: Option<f32>,
    /// Buffer the whole grid body in memory while inserting.
    #[clap(long)]
    pub intmem: bool,
    /// Station list file; one `ixp iyp file1 file2 file3` line per station.
    #[clap(long)]
    pub filelist: Option<PathBuf>,
    #[clap(long)]
    pub seisfile1: Option<PathBuf>,
    #[clap(long)]
    pub seisfile2: Option<PathBuf>,
    #[clap(long)]
    pub seisfile3: Option<PathBuf>,
    #[clap(long, allow_hyphen_values = true)]
    pub ixp: Option<i32>,
    #[clap(long, allow_hyphen_values = true)]
    pub iyp: Option<i32>,
}

/// Where the insertion run gets its station entries.
#[derive(Debug, Clone, PartialEq)]
pub enum StationSpec {
    List(PathBuf),
    Single(StationEntry),
}

/// What the run does once configured.
#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    ZeroFill { in_tsfile: PathBuf },
    Insert { intmem: bool, stations: StationSpec },
}

/// A fully resolved run configuration; constructing one proves every
/// mandatory parameter for the selected mode was supplied.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub out_tsfile: PathBuf,
    pub inbin: bool,
    pub swap_bytes: bool,
    pub nt: Option<i32>,
    pub dt: Option<f32>,
    pub mode: Mode,
}

impl Config {
    pub fn from_args(args: &CliArgs) -> Result<Config, ConfigError> {
        let mut missing = Vec::new();
        if args.out_tsfile.is_none() {
            missing.push("out_tsfile");
        }

        let mode = if args.zero_tsfile {
            if args.in_tsfile.is_none() {
                missing.push("in_tsfile");
            }
            args.in_tsfile.clone().map(|in_tsfile| Mode::ZeroFill { in_tsfile })
        } else if let Some(filelist) = &args.filelist {
            Some(Mode::Insert {
                intmem: args.intmem,
                stations: StationSpec::List(filelist.clone()),
            })
        } else {
            for (param, given) in [
                ("seisfile1", args.seisfile1.is_some()),
                ("seisfile2", args.seisfile2.is_some()),
                ("seisfile3", args.seisfile3.is_some()),
                ("ixp", args.ixp.is_some()),
                ("iyp", args.iyp.is_some()),
            ] {
                if !given {
                    missing.push(param);
                }
            }
            if missing.is_empty() {
                Some(Mode::Insert {
                    intmem: args.intmem,
                    stations: StationSpec::Single(StationEntry::new(
                        args.ixp.unwrap(),
                        args.iyp.unwrap(),
                        args.seisfile1.clone().unwrap(),
                        args.seisfile2.clone().unwrap(),
                        args.seisfile3.clone().unwrap(),
                    )),
                })
            } else {
                None
            }
        };

        if !missing.is_empty() {
            return Err(ConfigError::MissingParameters(missing));
        }
        Ok(Config {
            out_tsfile: args.out_tsfile.clone().unwrap(),
            inbin: args.inbin,
            swap_bytes: args.swap_bytes,
            nt: args.nt,
            dt: args.dt,
            mode: mode.unwrap(),
        })
    }
}
