use byteorder::{NativeEndian, WriteBytesExt};
use std::convert::TryInto;
use std::fmt;
use std::io::prelude::*;

use crate::swap::{swap_f32, swap_i32};
use crate::tsgrid_error::TsGridError;

/// Size in bytes of the grid header record: 15 four-byte fields, written by
/// the producing machine as a raw struct with no padding.
pub const TSHEADER_SIZE: usize = 60;

/// The fixed metadata record at the start of a grid file.
///
/// All fields are native-endian on disk; a file from a machine of the other
/// endianness is normalized by an explicit [TsHeader::swapped] call, never
/// implicitly.
#[derive(Debug, Clone, PartialEq)]
pub struct TsHeader {
    pub ix0: i32,
    pub iy0: i32,
    pub iz0: i32,
    pub it0: i32,
    pub nx: i32,
    pub ny: i32,
    pub nz: i32,
    pub nt: i32,
    pub dx: f32,
    pub dy: f32,
    pub dz: f32,
    pub dt: f32,
    pub modelrot: f32,
    pub modellat: f32,
    pub modellon: f32,
}

impl TsHeader {
    /// Reads a grid header from a byte buffer of at least [TSHEADER_SIZE] bytes.
    pub fn from_bytes(buffer: &[u8]) -> Result<TsHeader, TsGridError> {
        if buffer.len() < TSHEADER_SIZE {
            return Err(TsGridError::TruncatedHeader(buffer.len(), TSHEADER_SIZE));
        }
        let mut header_bytes = &buffer[0..TSHEADER_SIZE];
        let ix0 = read_ne_i32(&mut header_bytes);
        let iy0 = read_ne_i32(&mut header_bytes);
        let iz0 = read_ne_i32(&mut header_bytes);
        let it0 = read_ne_i32(&mut header_bytes);
        let nx = read_ne_i32(&mut header_bytes);
        let ny = read_ne_i32(&mut header_bytes);
        let nz = read_ne_i32(&mut header_bytes);
        let nt = read_ne_i32(&mut header_bytes);
        let dx = read_ne_f32(&mut header_bytes);
        let dy = read_ne_f32(&mut header_bytes);
        let dz = read_ne_f32(&mut header_bytes);
        let dt = read_ne_f32(&mut header_bytes);
        let modelrot = read_ne_f32(&mut header_bytes);
        let modellat = read_ne_f32(&mut header_bytes);
        let modellon = read_ne_f32(&mut header_bytes);
        Ok(TsHeader {
            ix0,
            iy0,
            iz0,
            it0,
            nx,
            ny,
            nz,
            nt,
            dx,
            dy,
            dz,
            dt,
            modelrot,
            modellat,
            modellon,
        })
    }

    /// Reads a grid header from the reader's current position, typically the
    /// start of the file.
    pub fn from_reader<R: Read>(reader: &mut R) -> Result<TsHeader, TsGridError> {
        let mut buffer = [0u8; TSHEADER_SIZE];
        reader.read_exact(&mut buffer)?;
        TsHeader::from_bytes(&buffer)
    }

    /// Writes the header record at the writer's current position.
    pub fn write_to<W>(&self, buf: &mut W) -> Result<(), TsGridError>
    where
        W: std::io::Write,
    {
        buf.write_i32::<NativeEndian>(self.ix0)?;
        buf.write_i32::<NativeEndian>(self.iy0)?;
        buf.write_i32::<NativeEndian>(self.iz0)?;
        buf.write_i32::<NativeEndian>(self.it0)?;
        buf.write_i32::<NativeEndian>(self.nx)?;
        buf.write_i32::<NativeEndian>(self.ny)?;
        buf.write_i32::<NativeEndian>(self.nz)?;
        buf.write_i32::<NativeEndian>(self.nt)?;
        buf.write_f32::<NativeEndian>(self.dx)?;
        buf.write_f32::<NativeEndian>(self.dy)?;
        buf.write_f32::<NativeEndian>(self.dz)?;
        buf.write_f32::<NativeEndian>(self.dt)?;
        buf.write_f32::<NativeEndian>(self.modelrot)?;
        buf.write_f32::<NativeEndian>(self.modellat)?;
        buf.write_f32::<NativeEndian>(self.modellon)?;
        Ok(())
    }

    /// Returns the header with every field byte-swapped, word by word.
    ///
    /// Exactly the 15 named fields are swapped, in declaration order.
    /// Swapping is its own inverse: `h.swapped().swapped() == h`.
    pub fn swapped(&self) -> TsHeader {
        TsHeader {
            ix0: swap_i32(self.ix0),
            iy0: swap_i32(self.iy0),
            iz0: swap_i32(self.iz0),
            it0: swap_i32(self.it0),
            nx: swap_i32(self.nx),
            ny: swap_i32(self.ny),
            nz: swap_i32(self.nz),
            nt: swap_i32(self.nt),
            dx: swap_f32(self.dx),
            dy: swap_f32(self.dy),
            dz: swap_f32(self.dz),
            dt: swap_f32(self.dt),
            modelrot: swap_f32(self.modelrot),
            modellat: swap_f32(self.modellat),
            modellon: swap_f32(self.modellon),
        }
    }

    /// Returns a copy with `nt` and/or `dt` replaced by caller-supplied
    /// values. Only the zero-fill path writes the overridden header back to
    /// disk; insertion uses the override in memory to size its loops.
    pub fn with_overrides(&self, nt: Option<i32>, dt: Option<f32>) -> TsHeader {
        let mut head = self.clone();
        if let Some(nt) = nt {
            head.nt = nt;
        }
        if let Some(dt) = dt {
            head.dt = dt;
        }
        head
    }
}

impl fmt::Display for TsHeader {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "nx= {} ny= {} nt= {}", self.nx, self.ny, self.nt)
    }
}

/// read a single native endian 32 bit int (4 bytes) and reset input
fn read_ne_i32(input: &mut &[u8]) -> i32 {
    let (int_bytes, rest) = input.split_at(std::mem::size_of::<i32>());
    *input = rest;
    i32::from_ne_bytes(int_bytes.try_into().unwrap())
}

/// read a single native endian 32 bit float (4 bytes) and reset input
fn read_ne_f32(input: &mut &[u8]) -> f32 {
    let (int_bytes, rest) = input.split_at(std::mem::size_of::<f32>());
    *input = rest;
    f32::from_ne_bytes(int_bytes.try_into().unwrap())
}
