// src/header/var_header.rs
use crate::error::{NexError, Result};
use crate::header::FileHeader;
use crate::types::VariableType;
use crate::utils::decode_fixed_string;
use byteorder::{ByteOrder, LittleEndian};
use serde::Serialize;

/// One entry of the variable index that follows the file header
///
/// Describes a variable's type, name and where its payload lives. Most of the
/// trailing fields only carry meaning for some variable types; the others
/// hold whatever the writer left there (usually zero).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariableHeader {
    /// Position of this entry in the on-disk index
    pub index: usize,
    pub var_type: VariableType,
    pub version: i32,
    pub name: String,
    /// Payload offset, relative to the start of the NEX structure
    pub data_offset: u32,
    /// Timestamps, intervals, waveforms, fragments or weights, depending on type
    pub count: u32,

    // neurons and waveforms
    pub wire_number: i32,
    pub unit_number: i32,
    pub gain: i32,
    pub filter: i32,
    pub x_pos: f64,
    pub y_pos: f64,

    // waveforms and continuous
    /// Sampling frequency in Hz
    pub w_frequency: f64,
    pub ad_to_mv: f64,
    /// Points per waveform, or total data points for continuous variables
    pub n_points_wave: i32,

    // markers
    pub n_markers: i32,
    pub marker_length: i32,

    pub mv_offset: f64,
    pub prethreshold_time: f64,
}

impl VariableHeader {
    pub const SIZE: usize = 208;
    pub const NAME_LEN: usize = 64;
    /// Width of a marker field name inside a marker payload.
    pub const MARKER_FIELD_NAME_LEN: usize = 64;

    /// Decode one index entry.
    ///
    /// Fields introduced by later file versions are zeroed for older files,
    /// since those writers left them undefined.
    pub fn parse(buf: &[u8], index: usize, file_version: i32) -> Result<Self> {
        if buf.len() < Self::SIZE {
            return Err(NexError::Truncated {
                what: "variable header",
                offset: (FileHeader::SIZE + index * Self::SIZE) as u64,
            });
        }

        let raw_type = LittleEndian::read_i32(&buf[0..4]);
        let var_type = VariableType::from_i32(raw_type)
            .ok_or(NexError::InvalidVariableType(raw_type))?;
        let name = decode_fixed_string(&buf[8..8 + Self::NAME_LEN]);

        let data_offset = non_negative(LittleEndian::read_i32(&buf[72..76]), "data offset", &name)?;
        let count = non_negative(LittleEndian::read_i32(&buf[76..80]), "count", &name)?;

        let mut mv_offset = LittleEndian::read_f64(&buf[140..148]);
        if file_version < FileHeader::MV_OFFSET_VERSION {
            mv_offset = 0.0;
        }
        let mut prethreshold_time = LittleEndian::read_f64(&buf[148..156]);
        if file_version < FileHeader::PRETHRESHOLD_VERSION {
            prethreshold_time = 0.0;
        }

        Ok(VariableHeader {
            index,
            var_type,
            version: LittleEndian::read_i32(&buf[4..8]),
            name,
            data_offset,
            count,
            wire_number: LittleEndian::read_i32(&buf[80..84]),
            unit_number: LittleEndian::read_i32(&buf[84..88]),
            gain: LittleEndian::read_i32(&buf[88..92]),
            filter: LittleEndian::read_i32(&buf[92..96]),
            x_pos: LittleEndian::read_f64(&buf[96..104]),
            y_pos: LittleEndian::read_f64(&buf[104..112]),
            w_frequency: LittleEndian::read_f64(&buf[112..120]),
            ad_to_mv: LittleEndian::read_f64(&buf[120..128]),
            n_points_wave: LittleEndian::read_i32(&buf[128..132]),
            n_markers: LittleEndian::read_i32(&buf[132..136]),
            marker_length: LittleEndian::read_i32(&buf[136..140]),
            mv_offset,
            prethreshold_time,
        })
    }

    pub fn count(&self) -> usize {
        self.count as usize
    }

    pub fn points_per_wave(&self) -> Result<usize> {
        non_negative(self.n_points_wave, "point count", &self.name).map(|n| n as usize)
    }

    pub fn marker_fields(&self) -> Result<usize> {
        non_negative(self.n_markers, "marker field count", &self.name).map(|n| n as usize)
    }

    pub fn marker_value_len(&self) -> Result<usize> {
        non_negative(self.marker_length, "marker length", &self.name).map(|n| n as usize)
    }

    /// Number of payload bytes this entry describes.
    pub fn payload_size(&self) -> Result<u64> {
        // Saturates instead of wrapping; a corrupt index then fails the bounds check.
        let count = self.count as u64;
        let size = match self.var_type {
            VariableType::Neuron | VariableType::Event => count * 4,
            VariableType::Interval => count * 8,
            VariableType::PopulationVector => count * 8,
            VariableType::Waveform => {
                let points = self.points_per_wave()? as u64;
                (count * 4).saturating_add(count.saturating_mul(points * 2))
            }
            VariableType::Continuous => {
                let points = self.points_per_wave()? as u64;
                count * 8 + points * 2
            }
            VariableType::Marker => {
                let fields = self.marker_fields()? as u64;
                let value_len = self.marker_value_len()? as u64;
                let per_field = count
                    .saturating_mul(value_len)
                    .saturating_add(Self::MARKER_FIELD_NAME_LEN as u64);
                (count * 4).saturating_add(fields.saturating_mul(per_field))
            }
        };
        Ok(size)
    }
}

fn non_negative(value: i32, field: &str, name: &str) -> Result<u32> {
    u32::try_from(value).map_err(|_| {
        NexError::InvalidFormat(format!("variable '{}' has negative {} {}", name, field, value))
    })
}
