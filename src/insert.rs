use byteorder::{NativeEndian, WriteBytesExt};
use std::convert::TryFrom;
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use crate::header::{TsHeader, TSHEADER_SIZE};
use crate::layout::{GridLayout, NUM_COMPONENTS};
use crate::station::{StationEntry, StationList};
use crate::trace::TraceSource;
use crate::tsgrid_error::TsGridError;

/// One strategy for writing station samples into a pre-existing grid file.
///
/// The two implementations trade memory for syscall count: [BufferedInsert]
/// holds the whole grid body in memory and touches the disk twice,
/// [SeekInsert] holds nothing and pays `3*nt` seek+write pairs per station.
/// The caller reads the header once, resolves swapping and nt/dt overrides,
/// and passes the same immutable value to whichever engine it selected.
pub trait InsertEngine {
    fn insert(
        &mut self,
        header: &TsHeader,
        stations: StationList,
        traces: &dyn TraceSource,
    ) -> Result<usize, TsGridError>;
}

/// Picks the engine once at startup; `intmem` selects the buffered strategy.
pub fn select_engine<P: Into<PathBuf>>(intmem: bool, grid_path: P) -> Box<dyn InsertEngine> {
    if intmem {
        Box::new(BufferedInsert::new(grid_path))
    } else {
        Box::new(SeekInsert::new(grid_path))
    }
}

/// Loads and validates the three component traces for one station.
///
/// Bounds are checked before any trace is read so an out-of-range station
/// fails before the run has done any work for it, and a trace shorter than
/// `nt` is rejected rather than read past.
fn load_components(
    layout: &GridLayout,
    entry: &StationEntry,
    traces: &dyn TraceSource,
) -> Result<(usize, usize, [Vec<f32>; NUM_COMPONENTS]), TsGridError> {
    let (ixp, iyp) = layout.check_station(entry.ixp, entry.iyp)?;
    let mut components: [Vec<f32>; NUM_COMPONENTS] = Default::default();
    for (comp, path) in entry.files.iter().enumerate() {
        let samples = traces.read_trace(path)?;
        if samples.len() < layout.nt {
            return Err(TsGridError::TraceLengthMismatch {
                path: path.clone(),
                got: samples.len(),
                need: layout.nt,
            });
        }
        components[comp] = samples;
    }
    Ok((ixp, iyp, components))
}

/// Loads the entire grid body into memory, patches every station into the
/// buffer, and writes the body back in a single pass: one read and one write
/// regardless of station count.
pub struct BufferedInsert {
    grid_path: PathBuf,
}

impl BufferedInsert {
    pub fn new<P: Into<PathBuf>>(grid_path: P) -> BufferedInsert {
        BufferedInsert {
            grid_path: grid_path.into(),
        }
    }
}

impl InsertEngine for BufferedInsert {
    fn insert(
        &mut self,
        header: &TsHeader,
        stations: StationList,
        traces: &dyn TraceSource,
    ) -> Result<usize, TsGridError> {
        let layout = GridLayout::try_from(header)?;
        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(&self.grid_path)?;

        file.seek(SeekFrom::Start(TSHEADER_SIZE as u64))?;
        let mut body = vec![0u8; layout.insert_bytes()];
        file.read_exact(&mut body)?;

        let mut count = 0;
        for entry in stations {
            let entry = entry?;
            let (ixp, iyp, components) = load_components(&layout, &entry, traces)?;
            for (comp, samples) in components.iter().enumerate() {
                for t in 0..layout.nt {
                    let at = layout.float_index(comp, t, ixp, iyp) * 4;
                    body[at..at + 4].copy_from_slice(&samples[t].to_ne_bytes());
                }
            }
            count += 1;
        }

        file.seek(SeekFrom::Start(TSHEADER_SIZE as u64))?;
        file.write_all(&body)?;
        file.flush()?;
        Ok(count)
    }
}

/// Writes each sample directly at its computed file offset, never buffering
/// the grid body.
///
/// Three handles are opened on the same output file, one per component, and
/// every write is positioned by an absolute seek from the start of the file.
/// The offsets come from the same [GridLayout] formula the buffered engine
/// uses, which is what makes the two engines byte-equivalent.
pub struct SeekInsert {
    grid_path: PathBuf,
}

impl SeekInsert {
    pub fn new<P: Into<PathBuf>>(grid_path: P) -> SeekInsert {
        SeekInsert {
            grid_path: grid_path.into(),
        }
    }

    fn open_component_handle(&self) -> Result<File, TsGridError> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(&self.grid_path)?;
        Ok(file)
    }
}

impl InsertEngine for SeekInsert {
    fn insert(
        &mut self,
        header: &TsHeader,
        stations: StationList,
        traces: &dyn TraceSource,
    ) -> Result<usize, TsGridError> {
        let layout = GridLayout::try_from(header)?;
        let mut handles = [
            self.open_component_handle()?,
            self.open_component_handle()?,
            self.open_component_handle()?,
        ];

        let mut count = 0;
        for entry in stations {
            let entry = entry?;
            let (ixp, iyp, components) = load_components(&layout, &entry, traces)?;
            for (comp, samples) in components.iter().enumerate() {
                let handle = &mut handles[comp];
                for t in 0..layout.nt {
                    handle.seek(SeekFrom::Start(layout.byte_offset(comp, t, ixp, iyp)))?;
                    handle.write_f32::<NativeEndian>(samples[t])?;
                }
            }
            count += 1;
        }

        for handle in &mut handles {
            handle.flush()?;
        }
        Ok(count)
    }
}

/// Reads the full body of a grid file back as floats, in storage order.
/// Mostly useful for verification and downstream tooling.
pub fn read_body<P: AsRef<Path>>(
    grid_path: P,
    layout: &GridLayout,
) -> Result<Vec<f32>, TsGridError> {
    let mut file = File::open(grid_path.as_ref())?;
    file.seek(SeekFrom::Start(TSHEADER_SIZE as u64))?;
    let mut body = vec![0u8; layout.body_bytes()];
    file.read_exact(&mut body)?;
    Ok(body
        .chunks_exact(4)
        .map(|b| f32::from_ne_bytes([b[0], b[1], b[2], b[3]]))
        .collect())
}
