// tests/common/mod.rs
//! Builds synthetic NEX files in memory for the integration tests.
#![allow(dead_code)]

use std::fs;
use std::io::Write;
use std::path::Path;

const FILE_HEADER_SIZE: usize = 544;
const VAR_HEADER_SIZE: usize = 208;

#[derive(Default, Clone)]
struct Var {
    var_type: i32,
    version: i32,
    name: String,
    count: i32,
    wire: i32,
    unit: i32,
    x_pos: f64,
    y_pos: f64,
    w_frequency: f64,
    ad_to_mv: f64,
    n_points_wave: i32,
    n_markers: i32,
    marker_length: i32,
    mv_offset: f64,
    prethreshold: f64,
    payload: Vec<u8>,
}

pub struct NexFileBuilder {
    version: i32,
    comment: String,
    frequency: f64,
    beg: i32,
    end: i32,
    vars: Vec<Var>,
}

fn push_i32s(buf: &mut Vec<u8>, values: &[i32]) {
    for v in values {
        buf.extend_from_slice(&v.to_le_bytes());
    }
}

fn push_i16s(buf: &mut Vec<u8>, values: &[i16]) {
    for v in values {
        buf.extend_from_slice(&v.to_le_bytes());
    }
}

fn push_fixed(buf: &mut Vec<u8>, text: &str, width: usize) {
    let mut field = vec![0u8; width];
    let len = text.len().min(width);
    field[..len].copy_from_slice(&text.as_bytes()[..len]);
    buf.extend_from_slice(&field);
}

impl NexFileBuilder {
    pub fn new(frequency: f64) -> Self {
        NexFileBuilder {
            version: 106,
            comment: String::new(),
            frequency,
            beg: 0,
            end: 0,
            vars: Vec::new(),
        }
    }

    pub fn version(mut self, version: i32) -> Self {
        self.version = version;
        self
    }

    pub fn comment(mut self, comment: &str) -> Self {
        self.comment = comment.to_string();
        self
    }

    pub fn span(mut self, beg: i32, end: i32) -> Self {
        self.beg = beg;
        self.end = end;
        self
    }

    pub fn neuron(mut self, name: &str, wire: i32, unit: i32, ticks: &[i32]) -> Self {
        let mut payload = Vec::new();
        push_i32s(&mut payload, ticks);
        self.vars.push(Var {
            var_type: 0,
            version: 101,
            name: name.to_string(),
            count: ticks.len() as i32,
            wire,
            unit,
            x_pos: wire as f64 * 10.0,
            y_pos: unit as f64 * 10.0,
            payload,
            ..Var::default()
        });
        self
    }

    pub fn event(mut self, name: &str, ticks: &[i32]) -> Self {
        let mut payload = Vec::new();
        push_i32s(&mut payload, ticks);
        self.vars.push(Var {
            var_type: 1,
            version: 100,
            name: name.to_string(),
            count: ticks.len() as i32,
            payload,
            ..Var::default()
        });
        self
    }

    pub fn interval(mut self, name: &str, pairs: &[(i32, i32)]) -> Self {
        let starts: Vec<i32> = pairs.iter().map(|p| p.0).collect();
        let ends: Vec<i32> = pairs.iter().map(|p| p.1).collect();
        let mut payload = Vec::new();
        push_i32s(&mut payload, &starts);
        push_i32s(&mut payload, &ends);
        self.vars.push(Var {
            var_type: 2,
            version: 100,
            name: name.to_string(),
            count: pairs.len() as i32,
            payload,
            ..Var::default()
        });
        self
    }

    pub fn waveform(
        mut self,
        name: &str,
        ticks: &[i32],
        points: usize,
        samples: &[i16],
        ad_to_mv: f64,
    ) -> Self {
        let mut payload = Vec::new();
        push_i32s(&mut payload, ticks);
        push_i16s(&mut payload, samples);
        self.vars.push(Var {
            var_type: 3,
            version: 101,
            name: name.to_string(),
            count: ticks.len() as i32,
            wire: 1,
            unit: 1,
            w_frequency: 40_000.0,
            ad_to_mv,
            n_points_wave: points as i32,
            payload,
            ..Var::default()
        });
        self
    }

    pub fn continuous(
        mut self,
        name: &str,
        fragment_ticks: &[i32],
        fragment_starts: &[i32],
        samples: &[i16],
        ad_to_mv: f64,
        mv_offset: f64,
    ) -> Self {
        let mut payload = Vec::new();
        push_i32s(&mut payload, fragment_ticks);
        push_i32s(&mut payload, fragment_starts);
        push_i16s(&mut payload, samples);
        self.vars.push(Var {
            var_type: 5,
            version: 100,
            name: name.to_string(),
            count: fragment_ticks.len() as i32,
            w_frequency: 1000.0,
            ad_to_mv,
            mv_offset,
            n_points_wave: samples.len() as i32,
            payload,
            ..Var::default()
        });
        self
    }

    pub fn marker(
        mut self,
        name: &str,
        ticks: &[i32],
        fields: &[(&str, &[&str])],
        marker_length: usize,
    ) -> Self {
        let mut payload = Vec::new();
        push_i32s(&mut payload, ticks);
        for (field_name, values) in fields {
            push_fixed(&mut payload, field_name, 64);
            for value in values.iter() {
                push_fixed(&mut payload, value, marker_length);
            }
        }
        self.vars.push(Var {
            var_type: 6,
            version: 100,
            name: name.to_string(),
            count: ticks.len() as i32,
            n_markers: fields.len() as i32,
            marker_length: marker_length as i32,
            payload,
            ..Var::default()
        });
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(b"NEX1");
        push_i32s(&mut out, &[self.version]);
        push_fixed(&mut out, &self.comment, 256);
        out.extend_from_slice(&self.frequency.to_le_bytes());
        push_i32s(&mut out, &[self.beg, self.end, self.vars.len() as i32, 0]);
        out.extend_from_slice(&[0u8; 256]);
        assert_eq!(out.len(), FILE_HEADER_SIZE);

        let mut data_offset = FILE_HEADER_SIZE + self.vars.len() * VAR_HEADER_SIZE;
        for var in &self.vars {
            let start = out.len();
            push_i32s(&mut out, &[var.var_type, var.version]);
            push_fixed(&mut out, &var.name, 64);
            push_i32s(&mut out, &[data_offset as i32, var.count, var.wire, var.unit, 0, 0]);
            for v in [var.x_pos, var.y_pos, var.w_frequency, var.ad_to_mv] {
                out.extend_from_slice(&v.to_le_bytes());
            }
            push_i32s(&mut out, &[var.n_points_wave, var.n_markers, var.marker_length]);
            out.extend_from_slice(&var.mv_offset.to_le_bytes());
            out.extend_from_slice(&var.prethreshold.to_le_bytes());
            out.extend_from_slice(&[0u8; 52]);
            assert_eq!(out.len() - start, VAR_HEADER_SIZE);
            data_offset += var.payload.len();
        }

        for var in &self.vars {
            out.extend_from_slice(&var.payload);
        }
        out
    }

    pub fn write_to(&self, path: &Path) {
        let mut file = fs::File::create(path).unwrap();
        file.write_all(&self.build()).unwrap();
    }
}

/// Two REM epochs, one Wake epoch and three neurons at 1 kHz
pub fn sleep_session() -> NexFileBuilder {
    NexFileBuilder::new(1000.0)
        .comment("sleep session")
        .span(0, 60_000)
        .neuron("sig001a", 1, 1, &[100, 250, 900])
        .interval("Rem", &[(1000, 2000), (5000, 8000)])
        .neuron("sig001b", 1, 2, &[50])
        .interval("Wake", &[(0, 1000)])
        .neuron("sig002a", 2, 1, &[])
}
