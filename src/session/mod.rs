//! Canvas session management module
//!
//! This module contains:
//! - Session state and the submission flow (state.rs)
//! - Message types for canvas interactions (messages.rs)

pub mod messages;
pub mod state;

pub use messages::{CanvasMsg, PointerMsg};
pub use state::{CanvasSession, Completed, PendingSubmit, Phase};
