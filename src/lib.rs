// src/lib.rs
//! # nex-rs
//!
//! A Rust library for reading NEX files, the neurophysiology data format of
//! NeuroExplorer (Nex Technologies).
//!
//! ## Features
//!
//! - **Random Access**: header and variable index are decoded once; payloads are
//!   read on demand by seeking to their recorded offsets
//! - **Owned Records**: intervals, neurons, events, markers, continuous and
//!   waveform variables decode into plain values with no tie to the reader
//! - **Strict Decoding**: truncated blocks and out-of-bounds payloads are
//!   reported as format errors, never silently shortened
//! - **Any Stream**: open by path, from an open `File`, from any `Read + Seek`
//!   stream, or memory-mapped with the `mmap` feature
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use nex_rs::*;
//!
//! fn main() -> Result<()> {
//!     let mut reader = NexReader::open("session.nex")?;
//!
//!     let header = reader.read_header();
//!     println!("{} variables at {} Hz", header.num_vars, header.frequency);
//!
//!     for name in reader.list_interval_names() {
//!         println!("Interval: {}", name);
//!     }
//!
//!     // Case-insensitive search
//!     let rem = reader.read_intervals("rem", false, None)?;
//!     println!("{} REM variables", rem.len());
//!
//!     // First and third neuron
//!     let neurons = reader.read_neurons(Some(&[0, 2]))?;
//!     for neuron in &neurons {
//!         println!("{}: {} spikes", neuron.name, neuron.timestamps.len());
//!     }
//!
//!     Ok(())
//! }
//! ```

// Modules
pub mod config;
pub mod error;
pub mod header;
pub mod raw_data;
pub mod reader;
pub mod records;
pub mod types;

mod utils;

// Re-export commonly used types at the crate root for convenience
pub use error::{NexError, Result};

pub use config::ReaderOptions;

pub use types::{ticks_to_seconds, CaseSensitivity, VariableType};

pub use header::{FileHeader, VariableHeader};

pub use raw_data::RawDataReader;

pub use records::{
    ContinuousRecord, EventRecord, Fragment, Interval, IntervalRecord, MarkerField, MarkerRecord,
    NeuronRecord, WaveformRecord,
};

pub use reader::{NexReader, NexSource, ReadSeek};

// Prelude module for glob imports
pub mod prelude {
    //! Convenient imports for common use cases.
    //!
    //! ```rust
    //! use nex_rs::prelude::*;
    //! ```

    pub use crate::config::ReaderOptions;
    pub use crate::error::{NexError, Result};
    pub use crate::reader::{NexReader, NexSource};
    pub use crate::records::{Interval, IntervalRecord, NeuronRecord};
    pub use crate::types::{CaseSensitivity, VariableType};
}

/// The newest NEX file version this library understands
pub const NEX_VERSION: i32 = 106;

/// The library version
pub const LIBRARY_VERSION: &str = env!("CARGO_PKG_VERSION");
