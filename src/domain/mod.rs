//! Pure domain types with minimal dependencies
//!
//! This module contains core types used throughout the crate.
//! Types here do no I/O and hold no rendering state.

pub mod geometry;
pub mod region;

pub use geometry::*;
pub use region::*;
