// src/raw_data/reader.rs
use crate::error::{NexError, Result};
use crate::utils::decode_fixed_string;
use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{self, Read};

/// Helper functions for reading payload data from NEX files
///
/// NEX files are always little-endian. Every read names what it is decoding
/// and where, so a short read surfaces as [`NexError::Truncated`] instead of
/// a bare `UnexpectedEof`.
pub struct RawDataReader;

impl RawDataReader {
    /// Read an array of `i32` values (timestamps, fragment indices)
    ///
    /// # Arguments
    ///
    /// * `reader` - The stream to read from
    /// * `count` - Number of values to read
    /// * `what` - Name of the block being read, used in error messages
    /// * `offset` - Absolute file offset of the block, used in error messages
    ///
    /// # Example
    ///
    /// ```
    /// use nex_rs::raw_data::RawDataReader;
    /// use std::io::Cursor;
    ///
    /// let data = vec![1u8, 0, 0, 0, 2, 0, 0, 0];
    /// let mut cursor = Cursor::new(data);
    ///
    /// let values = RawDataReader::read_i32_values(&mut cursor, 2, "timestamps", 0).unwrap();
    /// assert_eq!(values, vec![1, 2]);
    /// ```
    pub fn read_i32_values<R: Read>(
        reader: &mut R,
        count: usize,
        what: &'static str,
        offset: u64,
    ) -> Result<Vec<i32>> {
        if count == 0 {
            return Ok(Vec::new());
        }

        let mut values = vec![0i32; count];
        reader
            .read_i32_into::<LittleEndian>(&mut values)
            .map_err(|e| truncated(e, what, offset))?;
        Ok(values)
    }

    /// Read an array of `i16` A/D values
    pub fn read_i16_values<R: Read>(
        reader: &mut R,
        count: usize,
        what: &'static str,
        offset: u64,
    ) -> Result<Vec<i16>> {
        if count == 0 {
            return Ok(Vec::new());
        }

        let mut values = vec![0i16; count];
        reader
            .read_i16_into::<LittleEndian>(&mut values)
            .map_err(|e| truncated(e, what, offset))?;
        Ok(values)
    }

    /// Read a fixed-width, NUL-padded text field
    pub fn read_fixed_string<R: Read>(
        reader: &mut R,
        width: usize,
        what: &'static str,
        offset: u64,
    ) -> Result<String> {
        let mut bytes = vec![0u8; width];
        Self::read_block(reader, &mut bytes, what, offset)?;
        Ok(decode_fixed_string(&bytes))
    }

    /// Fill `buf` completely or fail with [`NexError::Truncated`]
    pub fn read_block<R: Read>(
        reader: &mut R,
        buf: &mut [u8],
        what: &'static str,
        offset: u64,
    ) -> Result<()> {
        reader.read_exact(buf).map_err(|e| truncated(e, what, offset))
    }
}

/// Map a short read onto the format error; anything else stays an I/O error.
fn truncated(err: io::Error, what: &'static str, offset: u64) -> NexError {
    if err.kind() == io::ErrorKind::UnexpectedEof {
        NexError::Truncated { what, offset }
    } else {
        NexError::Io(err)
    }
}
