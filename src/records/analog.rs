// src/records/analog.rs
use crate::error::{NexError, Result};
use crate::header::VariableHeader;
use crate::raw_data::RawDataReader;
use crate::types::ticks_to_seconds;
use serde::Serialize;
use std::io::Read;

fn to_millivolts(raw: &[i16], ad_to_mv: f64, mv_offset: f64) -> Vec<f64> {
    raw.iter().map(|&v| v as f64 * ad_to_mv + mv_offset).collect()
}

/// Continuously sampled variable, possibly split into fragments
///
/// Each fragment starts at `fragment_timestamps[i]` and covers
/// `samples[fragment_starts[i]..fragment_starts[i + 1]]` (the last fragment
/// runs to the end of `samples`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContinuousRecord {
    pub name: String,
    pub var_version: i32,
    /// Sampling frequency in Hz
    pub sampling_rate: f64,
    pub ad_to_mv: f64,
    pub mv_offset: f64,
    pub fragment_timestamps: Vec<f64>,
    /// Index of each fragment's first sample, 0-based
    pub fragment_starts: Vec<usize>,
    /// Samples in millivolts
    pub samples: Vec<f64>,
}

/// Borrowed view of one continuous fragment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fragment<'a> {
    pub start: f64,
    pub sampling_rate: f64,
    pub samples: &'a [f64],
}

impl Fragment<'_> {
    /// Time in seconds of the `i`-th sample of this fragment
    pub fn time_of(&self, i: usize) -> f64 {
        self.start + i as f64 / self.sampling_rate
    }
}

impl ContinuousRecord {
    /// Payload layout: `count` fragment timestamps, `count` fragment start
    /// indices, then `n_points_wave` 16-bit samples.
    pub(crate) fn decode<R: Read>(
        reader: &mut R,
        var: &VariableHeader,
        frequency: f64,
        offset: u64,
    ) -> Result<Self> {
        let count = var.count();
        let points = var.points_per_wave()?;

        let ticks = RawDataReader::read_i32_values(reader, count, "fragment timestamps", offset)?;
        let indexes = RawDataReader::read_i32_values(
            reader,
            count,
            "fragment indexes",
            offset + count as u64 * 4,
        )?;
        let raw = RawDataReader::read_i16_values(
            reader,
            points,
            "continuous samples",
            offset + count as u64 * 8,
        )?;

        let mut fragment_starts = Vec::with_capacity(count);
        let mut previous = 0usize;
        for &index in &indexes {
            let start = usize::try_from(index)
                .ok()
                .filter(|&s| s >= previous && s <= points)
                .ok_or_else(|| {
                    NexError::InvalidFormat(format!(
                        "continuous variable '{}' has fragment index {} outside 0..={}",
                        var.name, index, points
                    ))
                })?;
            fragment_starts.push(start);
            previous = start;
        }

        Ok(ContinuousRecord {
            name: var.name.clone(),
            var_version: var.version,
            sampling_rate: var.w_frequency,
            ad_to_mv: var.ad_to_mv,
            mv_offset: var.mv_offset,
            fragment_timestamps: ticks.iter().map(|&t| ticks_to_seconds(t, frequency)).collect(),
            fragment_starts,
            samples: to_millivolts(&raw, var.ad_to_mv, var.mv_offset),
        })
    }

    pub fn fragment_count(&self) -> usize {
        self.fragment_starts.len()
    }

    /// Fragment `i`, or `None` when `i` is out of range or the vectors disagree.
    pub fn fragment(&self, i: usize) -> Option<Fragment<'_>> {
        let start = *self.fragment_starts.get(i)?;
        let end = self
            .fragment_starts
            .get(i + 1)
            .copied()
            .unwrap_or(self.samples.len());
        Some(Fragment {
            start: *self.fragment_timestamps.get(i)?,
            sampling_rate: self.sampling_rate,
            samples: self.samples.get(start..end)?,
        })
    }

    pub fn fragments(&self) -> impl Iterator<Item = Fragment<'_>> {
        (0..self.fragment_count()).filter_map(move |i| self.fragment(i))
    }
}

/// Spike waveforms of one unit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WaveformRecord {
    pub name: String,
    pub var_version: i32,
    pub wire_number: i32,
    pub unit_number: i32,
    pub sampling_rate: f64,
    pub points_per_wave: usize,
    /// Seconds between the first waveform point and the timestamp
    pub prethreshold_time: f64,
    pub timestamps: Vec<f64>,
    /// One vector of `points_per_wave` millivolt values per timestamp
    pub waveforms: Vec<Vec<f64>>,
}

impl WaveformRecord {
    /// Payload layout: `count` timestamps, then `count * n_points_wave`
    /// 16-bit samples, one waveform after another.
    pub(crate) fn decode<R: Read>(
        reader: &mut R,
        var: &VariableHeader,
        frequency: f64,
        offset: u64,
    ) -> Result<Self> {
        let count = var.count();
        let points = var.points_per_wave()?;

        let ticks = RawDataReader::read_i32_values(reader, count, "waveform timestamps", offset)?;
        let raw = RawDataReader::read_i16_values(
            reader,
            count * points,
            "waveform samples",
            offset + count as u64 * 4,
        )?;

        let waveforms = if points == 0 {
            vec![Vec::new(); count]
        } else {
            raw.chunks_exact(points)
                .map(|wave| to_millivolts(wave, var.ad_to_mv, var.mv_offset))
                .collect()
        };

        Ok(WaveformRecord {
            name: var.name.clone(),
            var_version: var.version,
            wire_number: var.wire_number,
            unit_number: var.unit_number,
            sampling_rate: var.w_frequency,
            points_per_wave: points,
            prethreshold_time: var.prethreshold_time,
            timestamps: ticks.iter().map(|&t| ticks_to_seconds(t, frequency)).collect(),
            waveforms,
        })
    }

    /// Time in seconds of the first point of waveform `i`
    pub fn first_point_time(&self, i: usize) -> Option<f64> {
        self.timestamps.get(i).map(|t| t - self.prethreshold_time)
    }
}
