// src/raw_data/mod.rs
//! Raw payload decoding for NEX files
//!
//! Variable payloads are flat little-endian arrays: `i32` tick timestamps,
//! `i32` fragment indices, `i16` A/D samples and fixed-width marker strings.
//!
//! ```
//! use nex_rs::raw_data::RawDataReader;
//! use std::io::Cursor;
//!
//! let data = vec![0xE8u8, 0x03, 0, 0, 0xD0, 0x07, 0, 0];
//! let mut cursor = Cursor::new(data);
//!
//! let ticks = RawDataReader::read_i32_values(&mut cursor, 2, "timestamps", 0).unwrap();
//! assert_eq!(ticks, vec![1000, 2000]);
//! ```

mod reader;

pub use reader::RawDataReader;
