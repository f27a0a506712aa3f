// src/header/file_header.rs
use crate::error::{NexError, Result};
use crate::types::ticks_to_seconds;
use crate::utils::decode_fixed_string;
use byteorder::{ByteOrder, LittleEndian};
use serde::Serialize;

/// NEX file header
///
/// Decoded once when a file is opened and never modified afterwards.
/// `beg` and `end` are kept in raw ticks; use [`FileHeader::tbeg`] and
/// [`FileHeader::tend`] for seconds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileHeader {
    pub version: i32,
    pub comment: String,
    /// Timestamp frequency in Hz. One tick is `1 / frequency` seconds.
    pub frequency: f64,
    /// Minimum timestamp, in ticks
    pub beg: i32,
    /// Maximum timestamp + 1, in ticks
    pub end: i32,
    pub num_vars: u32,
    /// Reserved by the format; never populated by current writers.
    pub next_file_header: i32,
}

impl FileHeader {
    pub const SIZE: usize = 544;
    pub const MAGIC: &'static [u8; 4] = b"NEX1";
    pub const MAGIC_NUMBER: i32 = 0x3158_454E;
    pub const COMMENT_LEN: usize = 256;

    /// Versions 102 and 103 were beta releases of the format.
    pub const BETA_VERSIONS: [i32; 2] = [102, 103];
    /// First version whose variable headers may carry a non-zero mV offset.
    pub const MV_OFFSET_VERSION: i32 = 105;
    /// First version whose waveform headers may carry a pre-threshold time.
    pub const PRETHRESHOLD_VERSION: i32 = 106;

    /// Check the 4-byte signature at the start of the file.
    pub fn check_magic(bytes: &[u8; 4]) -> Result<()> {
        if bytes != Self::MAGIC {
            return Err(NexError::InvalidMagic {
                found: String::from_utf8_lossy(bytes).into_owned(),
            });
        }
        Ok(())
    }

    /// Decode the header block. `buf` starts with the signature.
    pub fn parse(buf: &[u8; FileHeader::SIZE]) -> Result<Self> {
        let mut magic = [0u8; 4];
        magic.copy_from_slice(&buf[0..4]);
        Self::check_magic(&magic)?;

        let version = LittleEndian::read_i32(&buf[4..8]);
        let comment = decode_fixed_string(&buf[8..8 + Self::COMMENT_LEN]);
        let frequency = LittleEndian::read_f64(&buf[264..272]);
        let beg = LittleEndian::read_i32(&buf[272..276]);
        let end = LittleEndian::read_i32(&buf[276..280]);
        let num_vars = LittleEndian::read_i32(&buf[280..284]);
        let next_file_header = LittleEndian::read_i32(&buf[284..288]);

        if !(frequency.is_finite() && frequency > 0.0) {
            return Err(NexError::InvalidFormat(format!(
                "timestamp frequency must be positive, found {}",
                frequency
            )));
        }

        let num_vars = u32::try_from(num_vars).map_err(|_| {
            NexError::InvalidFormat(format!("negative variable count {}", num_vars))
        })?;

        Ok(FileHeader {
            version,
            comment,
            frequency,
            beg,
            end,
            num_vars,
            next_file_header,
        })
    }

    /// Minimum timestamp in seconds
    pub fn tbeg(&self) -> f64 {
        ticks_to_seconds(self.beg, self.frequency)
    }

    /// Maximum timestamp in seconds
    pub fn tend(&self) -> f64 {
        ticks_to_seconds(self.end, self.frequency)
    }

    /// Recording duration in seconds, measured from time zero.
    pub fn duration(&self) -> f64 {
        self.tend()
    }

    pub fn is_beta_version(&self) -> bool {
        Self::BETA_VERSIONS.contains(&self.version)
    }

    /// Byte length of the header plus the variable index that follows it.
    pub fn index_end(&self) -> u64 {
        Self::SIZE as u64 + self.num_vars as u64 * super::VariableHeader::SIZE as u64
    }
}
