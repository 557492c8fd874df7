//! Circle areas of a room photo and hand them to an AI interior service.
//!
//! The region selector turns press-drag-release gestures over the displayed
//! photo into circles in intrinsic pixels. The session captures a snapshot,
//! normalizes the circles against it and submits both to the rendering
//! endpoint.

pub mod capture;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod domain;
pub mod engine;
pub mod normalize;
pub mod profile;
pub mod render;
pub mod selector;
pub mod session;
pub mod vote;
