// src/utils/mod.rs

pub mod cancel;
pub mod format;
