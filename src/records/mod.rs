// src/records/mod.rs
//! Owned, decoded variable payloads
//!
//! Every record is independent of the reader that produced it. Timestamps are
//! in seconds and analog values in millivolts.

mod analog;
mod marker;
mod timestamps;

pub use analog::{ContinuousRecord, Fragment, WaveformRecord};
pub use marker::{MarkerField, MarkerRecord};
pub use timestamps::{EventRecord, Interval, IntervalRecord, NeuronRecord};

pub(crate) use timestamps::check_ordered;
