// src/header/mod.rs
//! Fixed-size header blocks of a NEX file
//!
//! ```text
//! ┌──────────────────────────────┐  0
//! │ FileHeader        544 bytes  │
//! ├──────────────────────────────┤  544
//! │ VariableHeader × num_vars    │
//! │                  208 bytes   │
//! ├──────────────────────────────┤
//! │ payloads, located by each    │
//! │ entry's data offset          │
//! └──────────────────────────────┘
//! ```

mod file_header;
mod var_header;

pub use file_header::FileHeader;
pub use var_header::VariableHeader;
