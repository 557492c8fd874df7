//! Message types for the canvas session
//!
//! This module contains:
//! - CanvasMsg enum with nested sub-enums for organized message handling

use crate::capture::SourceImage;
use crate::domain::DisplayRect;
use crate::selector::PointerInput;

// ============================================================================
// Pointer Types
// ============================================================================

/// Pointer events over the displayed photo, each with the photo's current
/// on-screen box
#[derive(Debug, Clone)]
pub enum PointerMsg {
    /// Press / touch start
    Down(PointerInput, DisplayRect),
    /// Drag / touch move
    Move(PointerInput, DisplayRect),
    /// Release / touch end
    Up(PointerInput, DisplayRect),
    /// Pointer left the canvas mid-gesture
    Leave,
}

// ============================================================================
// Top-level Message
// ============================================================================

#[derive(Debug, Clone)]
pub enum CanvasMsg {
    Pointer(PointerMsg),
    /// Clear all circled regions
    ResetRegions,
    /// A new photo finished loading
    LoadImage(SourceImage),
    /// Photo removed
    ClearImage,
    /// Selection confirmed; capture the snapshot
    Confirm,
}

impl CanvasMsg {
    pub fn down(input: PointerInput, display: DisplayRect) -> Self {
        CanvasMsg::Pointer(PointerMsg::Down(input, display))
    }

    pub fn moved(input: PointerInput, display: DisplayRect) -> Self {
        CanvasMsg::Pointer(PointerMsg::Move(input, display))
    }

    pub fn up(input: PointerInput, display: DisplayRect) -> Self {
        CanvasMsg::Pointer(PointerMsg::Up(input, display))
    }
}
