// src/utils/mod.rs
mod string_encoding;

pub(crate) use string_encoding::*;
