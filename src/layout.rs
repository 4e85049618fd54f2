use std::convert::TryFrom;

use crate::header::{TsHeader, TSHEADER_SIZE};
use crate::tsgrid_error::TsGridError;

/// Number of motion components stored per grid point.
pub const NUM_COMPONENTS: usize = 3;

/// Addressing arithmetic for the grid file body.
///
/// The body is laid out time-major: sample `t` of component `c` for every
/// grid point forms one contiguous plane of `nx*ny` floats, and the three
/// component planes for a time sample are adjacent. The super-block for one
/// time step is therefore `3*nx*ny` floats, and within a plane points are
/// row-major in y, then x. Both insertion engines and the zero-fill
/// initializer get every offset from here, so the plane formula lives in
/// exactly one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    pub nx: usize,
    pub ny: usize,
    pub nz: usize,
    pub nt: usize,
}

impl TryFrom<&TsHeader> for GridLayout {
    type Error = TsGridError;

    fn try_from(head: &TsHeader) -> Result<GridLayout, TsGridError> {
        if head.nx <= 0 || head.ny <= 0 || head.nz <= 0 || head.nt <= 0 {
            return Err(TsGridError::InvalidDimensions {
                nx: head.nx,
                ny: head.ny,
                nz: head.nz,
                nt: head.nt,
            });
        }
        Ok(GridLayout {
            nx: head.nx as usize,
            ny: head.ny as usize,
            nz: head.nz as usize,
            nt: head.nt as usize,
        })
    }
}

impl GridLayout {
    /// Floats in one component plane for a single time sample.
    pub fn plane_floats(&self) -> usize {
        self.nx * self.ny
    }

    /// Floats in the super-block for one time step, all three components.
    pub fn time_block_floats(&self) -> usize {
        NUM_COMPONENTS * self.plane_floats()
    }

    /// Floats in the full file body, per the grid file size invariant.
    pub fn body_floats(&self) -> usize {
        self.nx * self.ny * self.nz * NUM_COMPONENTS * self.nt
    }

    /// Bytes in the full file body.
    pub fn body_bytes(&self) -> usize {
        self.body_floats() * 4
    }

    /// Floats covered by station insertion: `3*nx*ny*nt`, the region the
    /// buffered engine loads and both engines address into.
    pub fn insert_floats(&self) -> usize {
        NUM_COMPONENTS * self.nx * self.ny * self.nt
    }

    /// Bytes covered by station insertion.
    pub fn insert_bytes(&self) -> usize {
        self.insert_floats() * 4
    }

    /// Float index, from the start of the body, of sample `t` of component
    /// `comp` at grid point `(ixp, iyp)`.
    pub fn float_index(&self, comp: usize, t: usize, ixp: usize, iyp: usize) -> usize {
        t * self.time_block_floats() + comp * self.plane_floats() + iyp * self.nx + ixp
    }

    /// Absolute byte offset in the grid file for the same sample.
    pub fn byte_offset(&self, comp: usize, t: usize, ixp: usize, iyp: usize) -> u64 {
        TSHEADER_SIZE as u64 + self.float_index(comp, t, ixp, iyp) as u64 * 4
    }

    /// Rejects station coordinates outside `[0,nx) x [0,ny)` before any
    /// write can land on a neighbouring grid point.
    pub fn check_station(&self, ixp: i32, iyp: i32) -> Result<(usize, usize), TsGridError> {
        if ixp < 0 || iyp < 0 || ixp as usize >= self.nx || iyp as usize >= self.ny {
            return Err(TsGridError::StationOutOfBounds {
                ixp,
                iyp,
                nx: self.nx,
                ny: self.ny,
            });
        }
        Ok((ixp as usize, iyp as usize))
    }
}
