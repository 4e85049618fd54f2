use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::{Path, PathBuf};

use crate::tsgrid_error::TsGridError;

/// One unit of insertion work: grid coordinates plus the three component
/// trace files recorded at that station.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationEntry {
    pub ixp: i32,
    pub iyp: i32,
    pub files: [PathBuf; 3],
}

impl StationEntry {
    pub fn new<P: Into<PathBuf>>(ixp: i32, iyp: i32, file1: P, file2: P, file3: P) -> StationEntry {
        StationEntry {
            ixp,
            iyp,
            files: [file1.into(), file2.into(), file3.into()],
        }
    }

    /// Parses a station list line: `ixp iyp file1 file2 file3`,
    /// whitespace-separated, fixed field order. Anything else is a hard
    /// error; a half-parsed line must never fall through and reuse fields
    /// from the previous station.
    fn parse_line(line: &str, line_no: usize) -> Result<StationEntry, TsGridError> {
        let parse_err = || TsGridError::StationParse {
            line_no,
            line: line.to_string(),
        };
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != 5 {
            return Err(parse_err());
        }
        let ixp: i32 = fields[0].parse().map_err(|_| parse_err())?;
        let iyp: i32 = fields[1].parse().map_err(|_| parse_err())?;
        Ok(StationEntry::new(ixp, iyp, fields[2], fields[3], fields[4]))
    }
}

/// A lazy, finite, single-pass sequence of station entries, consumed one at
/// a time by whichever insertion engine is active.
pub enum StationList {
    Single(Option<StationEntry>),
    List {
        lines: Lines<BufReader<File>>,
        line_no: usize,
    },
}

impl StationList {
    /// A sequence of exactly one explicitly supplied station.
    pub fn single(entry: StationEntry) -> StationList {
        StationList::Single(Some(entry))
    }

    /// Opens a station list file; each non-blank line yields one entry.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<StationList, TsGridError> {
        let file = File::open(path.as_ref())?;
        Ok(StationList::List {
            lines: BufReader::new(file).lines(),
            line_no: 0,
        })
    }
}

impl Iterator for StationList {
    type Item = Result<StationEntry, TsGridError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            StationList::Single(entry) => entry.take().map(Ok),
            StationList::List { lines, line_no } => loop {
                let line = match lines.next()? {
                    Ok(line) => line,
                    Err(e) => return Some(Err(e.into())),
                };
                *line_no += 1;
                if line.trim().is_empty() {
                    continue;
                }
                return Some(StationEntry::parse_line(&line, *line_no));
            },
        }
    }
}
