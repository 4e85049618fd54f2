use std::convert::TryFrom;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::header::{TsHeader, TSHEADER_SIZE};
use crate::layout::{GridLayout, NUM_COMPONENTS};
use crate::tsgrid_error::TsGridError;

/// Creates a brand-new grid file at `out_path` holding `header` followed by
/// `nx*ny*nz` all-zero grid-point records of `3*nt` floats each.
///
/// One zeroed record is allocated and written repeatedly, so memory use is
/// `3*nt*4` bytes regardless of grid size. Returns the total bytes written,
/// which always equals `TSHEADER_SIZE + nx*ny*nz*3*nt*4`. This path never
/// reads station data; the header it writes is whatever the caller resolved
/// (template header, optionally byte-swapped on read, optionally with nt/dt
/// overridden).
pub fn zero_fill<P: AsRef<Path>>(out_path: P, header: &TsHeader) -> Result<u64, TsGridError> {
    let layout = GridLayout::try_from(header)?;

    let file = File::create(out_path.as_ref())?;
    let mut writer = BufWriter::new(file);
    header.write_to(&mut writer)?;

    let record = vec![0u8; NUM_COMPONENTS * layout.nt * 4];
    let num_records = layout.nx * layout.ny * layout.nz;
    for _ in 0..num_records {
        writer.write_all(&record)?;
    }
    writer.flush()?;

    Ok(TSHEADER_SIZE as u64 + (num_records * record.len()) as u64)
}
