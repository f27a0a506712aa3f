// src/records/timestamps.rs
use crate::error::{NexError, Result};
use crate::header::VariableHeader;
use crate::raw_data::RawDataReader;
use crate::types::ticks_to_seconds;
use serde::Serialize;
use std::io::Read;

fn to_seconds(ticks: &[i32], frequency: f64) -> Vec<f64> {
    ticks.iter().map(|&t| ticks_to_seconds(t, frequency)).collect()
}

/// A single start/end pair, in seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Interval {
    pub start: f64,
    pub end: f64,
}

impl Interval {
    /// Always derived from the endpoints.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// All intervals of one interval variable, in file order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntervalRecord {
    pub name: String,
    pub var_version: i32,
    pub intervals: Vec<Interval>,
}

impl IntervalRecord {
    /// Decode an interval payload: `count` start ticks followed by `count` end ticks.
    pub(crate) fn decode<R: Read>(
        reader: &mut R,
        var: &VariableHeader,
        frequency: f64,
        offset: u64,
    ) -> Result<Self> {
        let starts = RawDataReader::read_i32_values(reader, var.count(), "interval starts", offset)?;
        let ends = RawDataReader::read_i32_values(
            reader,
            var.count(),
            "interval ends",
            offset + var.count() as u64 * 4,
        )?;

        let intervals = starts
            .iter()
            .zip(&ends)
            .map(|(&start, &end)| Interval {
                start: ticks_to_seconds(start, frequency),
                end: ticks_to_seconds(end, frequency),
            })
            .collect();

        Ok(IntervalRecord {
            name: var.name.clone(),
            var_version: var.version,
            intervals,
        })
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    pub fn starts(&self) -> Vec<f64> {
        self.intervals.iter().map(|i| i.start).collect()
    }

    pub fn ends(&self) -> Vec<f64> {
        self.intervals.iter().map(|i| i.end).collect()
    }

    pub fn durations(&self) -> Vec<f64> {
        self.intervals.iter().map(Interval::duration).collect()
    }

    /// Sum of all interval durations, in seconds
    pub fn total_duration(&self) -> f64 {
        self.intervals.iter().map(Interval::duration).sum()
    }
}

/// Spike train of one neuron variable plus its electrode metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NeuronRecord {
    pub name: String,
    pub var_version: i32,
    pub wire_number: i32,
    pub unit_number: i32,
    pub x_pos: f64,
    pub y_pos: f64,
    /// Spike times in seconds
    pub timestamps: Vec<f64>,
}

impl NeuronRecord {
    pub(crate) fn decode<R: Read>(
        reader: &mut R,
        var: &VariableHeader,
        frequency: f64,
        offset: u64,
    ) -> Result<Self> {
        let ticks = RawDataReader::read_i32_values(reader, var.count(), "neuron timestamps", offset)?;
        Ok(NeuronRecord {
            name: var.name.clone(),
            var_version: var.version,
            wire_number: var.wire_number,
            unit_number: var.unit_number,
            x_pos: var.x_pos,
            y_pos: var.y_pos,
            timestamps: to_seconds(&ticks, frequency),
        })
    }

    /// Mean firing rate over `duration` seconds
    pub fn firing_rate(&self, duration: f64) -> Option<f64> {
        if duration > 0.0 {
            Some(self.timestamps.len() as f64 / duration)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventRecord {
    pub name: String,
    pub var_version: i32,
    pub timestamps: Vec<f64>,
}

impl EventRecord {
    pub(crate) fn decode<R: Read>(
        reader: &mut R,
        var: &VariableHeader,
        frequency: f64,
        offset: u64,
    ) -> Result<Self> {
        let ticks = RawDataReader::read_i32_values(reader, var.count(), "event timestamps", offset)?;
        Ok(EventRecord {
            name: var.name.clone(),
            var_version: var.version,
            timestamps: to_seconds(&ticks, frequency),
        })
    }
}

/// Reject intervals whose end precedes their start.
pub(crate) fn check_ordered(record: &IntervalRecord) -> Result<()> {
    match record.intervals.iter().position(|i| i.end < i.start) {
        Some(pos) => Err(NexError::InvalidFormat(format!(
            "interval {} of '{}' ends before it starts",
            pos, record.name
        ))),
        None => Ok(()),
    }
}
