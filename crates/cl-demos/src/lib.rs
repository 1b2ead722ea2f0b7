//! Shared pieces of the `camera` and `read_file` demos.

pub mod assets;
pub mod controls;
pub mod lines;
