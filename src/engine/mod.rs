//! AI interior engine
//!
//! This module consolidates:
//! - Request assembly and multipart encoding (request.rs)
//! - HTTP client and the service seam (client.rs)
//! - Response parsing and result selection (response.rs)
//! - Base64 image sniffing (payload.rs)
//! - Submission errors (error.rs)

pub mod client;
pub mod error;
pub mod payload;
pub mod request;
pub mod response;

pub use client::{AiClient, RenderService};
pub use error::SubmitError;
pub use payload::{EncodedImage, PayloadFormat, sniff};
pub use request::EditRequest;
pub use response::{AiOutcome, AiResponse, ResultImage};
