// src/records/marker.rs
use crate::error::Result;
use crate::header::VariableHeader;
use crate::raw_data::RawDataReader;
use crate::types::ticks_to_seconds;
use serde::Serialize;
use std::io::Read;

/// One named field of a marker variable, with one value per timestamp
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerField {
    pub name: String,
    pub values: Vec<String>,
}

/// Marker variable: timestamps annotated with one or more text fields
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerRecord {
    pub name: String,
    pub var_version: i32,
    pub timestamps: Vec<f64>,
    pub fields: Vec<MarkerField>,
}

impl MarkerRecord {
    /// Payload layout: `count` timestamps, then per field a 64-byte field
    /// name followed by `count` values of `marker_length` bytes each.
    pub(crate) fn decode<R: Read>(
        reader: &mut R,
        var: &VariableHeader,
        frequency: f64,
        offset: u64,
    ) -> Result<Self> {
        let count = var.count();
        let field_count = var.marker_fields()?;
        let value_len = var.marker_value_len()?;

        let ticks = RawDataReader::read_i32_values(reader, count, "marker timestamps", offset)?;
        let timestamps = ticks.iter().map(|&t| ticks_to_seconds(t, frequency)).collect();

        let mut position = offset + count as u64 * 4;
        let mut fields = Vec::with_capacity(field_count);
        for _ in 0..field_count {
            let name = RawDataReader::read_fixed_string(
                reader,
                VariableHeader::MARKER_FIELD_NAME_LEN,
                "marker field name",
                position,
            )?;
            position += VariableHeader::MARKER_FIELD_NAME_LEN as u64;

            let mut values = Vec::with_capacity(count);
            for _ in 0..count {
                values.push(RawDataReader::read_fixed_string(
                    reader,
                    value_len,
                    "marker value",
                    position,
                )?);
                position += value_len as u64;
            }
            fields.push(MarkerField { name, values });
        }

        Ok(MarkerRecord {
            name: var.name.clone(),
            var_version: var.version,
            timestamps,
            fields,
        })
    }

    pub fn field(&self, name: &str) -> Option<&MarkerField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Value of `field` at the `i`-th timestamp
    pub fn value(&self, field: &str, i: usize) -> Option<&str> {
        self.field(field)
            .and_then(|f| f.values.get(i))
            .map(String::as_str)
    }
}
