//! Region selector: press-drag-release circles over the displayed photo
//!
//! The selector owns the committed region list. Every pointer event comes
//! with the current on-screen box of the photo and is mapped to intrinsic
//! pixels on the spot. Observers registered with [`RegionSelector::on_redraw`]
//! are told about every commit, reset and preview change.

pub mod input;

pub use input::PointerInput;

use crate::config::{HomesCanvasConfig, SelectionPolicy};
use crate::domain::{CircleConvention, DisplayRect, FitMode, FrameSize, Point, Region, ViewportMapping};

/// What the overlay has to show after a change
#[derive(Clone, Copy, Debug)]
pub struct Redraw<'a> {
    /// Committed regions, drawn solid
    pub regions: &'a [Region],
    /// Circle of the active gesture, drawn dashed
    pub preview: Option<Region>,
}

pub type RedrawObserver = Box<dyn FnMut(Redraw<'_>) + Send>;

/// Selector behaviour taken from the configuration
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SelectorSettings {
    pub policy: SelectionPolicy,
    pub convention: CircleConvention,
    pub fit_mode: FitMode,
    /// Minimum on-screen drag length for a gesture to become a region
    pub min_drag_distance: f32,
}

impl Default for SelectorSettings {
    fn default() -> Self {
        Self::from(&HomesCanvasConfig::default())
    }
}

impl From<&HomesCanvasConfig> for SelectorSettings {
    fn from(config: &HomesCanvasConfig) -> Self {
        Self {
            policy: config.selection_policy,
            convention: config.circle_convention,
            fit_mode: config.fit_mode,
            min_drag_distance: config.min_drag_distance.max(0.0),
        }
    }
}

/// Gesture in progress
#[derive(Clone, Copy, Debug)]
struct Gesture {
    start_display: Point,
    /// Start point in intrinsic pixels
    start: Point,
    /// Last display position seen, used when the release carries no point
    last_display: Point,
}

pub struct RegionSelector {
    settings: SelectorSettings,
    frame: Option<FrameSize>,
    regions: Vec<Region>,
    drawing: Option<Gesture>,
    preview: Option<Region>,
    revision: u64,
    observers: Vec<RedrawObserver>,
}

impl std::fmt::Debug for RegionSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegionSelector")
            .field("settings", &self.settings)
            .field("frame", &self.frame)
            .field("regions", &self.regions)
            .field("drawing", &self.drawing)
            .field("preview", &self.preview)
            .field("revision", &self.revision)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl RegionSelector {
    pub fn new(settings: SelectorSettings) -> Self {
        Self {
            settings,
            frame: None,
            regions: Vec::new(),
            drawing: None,
            preview: None,
            revision: 0,
            observers: Vec::new(),
        }
    }

    /// Register a redraw observer
    pub fn on_redraw(&mut self, observer: impl FnMut(Redraw<'_>) + Send + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn settings(&self) -> SelectorSettings {
        self.settings
    }

    /// A new source image finished loading; previous regions are discarded
    pub fn load_frame(&mut self, frame: FrameSize) {
        log::debug!("Selector frame set to {}x{}", frame.width, frame.height);
        self.frame = Some(frame).filter(|f| !f.is_empty());
        self.discard();
    }

    /// The source image went away; gestures become no-ops
    pub fn unload(&mut self) {
        self.frame = None;
        self.discard();
    }

    /// Start a gesture. Returns false if it was ignored.
    pub fn begin(&mut self, input: &PointerInput, display: DisplayRect) -> bool {
        let Some(frame) = self.frame else {
            log::trace!("Ignoring gesture start: no image loaded");
            return false;
        };
        let Some(pos) = input.position() else {
            log::trace!("Ignoring gesture start without pointer data");
            return false;
        };
        let Some(mapping) = ViewportMapping::compute(frame, display, self.settings.fit_mode) else {
            log::trace!("Ignoring gesture start: image not displayed");
            return false;
        };

        self.drawing = Some(Gesture {
            start_display: pos,
            start: mapping.to_intrinsic(pos),
            last_display: pos,
        });
        self.preview = None;
        true
    }

    /// Move during a gesture; returns the candidate circle shown as preview
    pub fn update(&mut self, input: &PointerInput, display: DisplayRect) -> Option<Region> {
        let frame = self.frame?;
        let pos = input.position()?;
        let mapping = ViewportMapping::compute(frame, display, self.settings.fit_mode)?;
        let gesture = self.drawing.as_mut()?;

        gesture.last_display = pos;
        let candidate = circle_in_frame(
            self.settings.convention,
            &mapping,
            gesture.start,
            mapping.to_intrinsic(pos),
        );
        self.preview = Some(candidate);
        self.notify();
        Some(candidate)
    }

    /// Finish a gesture; returns the committed region, if any
    pub fn end(&mut self, input: &PointerInput, display: DisplayRect) -> Option<Region> {
        let gesture = self.drawing.take()?;
        let had_preview = self.preview.take().is_some();

        let committed = self.commit(gesture, input, display);
        if committed.is_none() && had_preview {
            // Preview must disappear even though nothing was committed
            self.notify();
        }
        committed
    }

    /// Abandon the active gesture (pointer left the canvas)
    pub fn cancel(&mut self) {
        if self.drawing.take().is_some() && self.preview.take().is_some() {
            self.notify();
        }
    }

    /// Clear all committed regions
    pub fn reset(&mut self) {
        log::debug!("Resetting {} region(s)", self.regions.len());
        self.discard();
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn preview(&self) -> Option<Region> {
        self.preview
    }

    pub fn frame(&self) -> Option<FrameSize> {
        self.frame
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing.is_some()
    }

    /// Bumped on every change to the committed list or the frame
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn commit(&mut self, gesture: Gesture, input: &PointerInput, display: DisplayRect) -> Option<Region> {
        let frame = self.frame?;
        let mapping = ViewportMapping::compute(frame, display, self.settings.fit_mode)?;
        let end_display = input.position().unwrap_or(gesture.last_display);

        let drag = gesture.start_display.distance(end_display);
        if drag <= self.settings.min_drag_distance {
            log::debug!(
                "Drag of {:.1}px below threshold {:.1}px, dropped",
                drag,
                self.settings.min_drag_distance
            );
            return None;
        }

        let region = circle_in_frame(
            self.settings.convention,
            &mapping,
            gesture.start,
            mapping.to_intrinsic(end_display),
        );
        if region.radius <= 0.0 || !region.radius.is_finite() {
            return None;
        }

        match self.settings.policy {
            SelectionPolicy::SingleRegion => {
                self.regions.clear();
                self.regions.push(region);
            }
            SelectionPolicy::MultiRegion => self.regions.push(region),
        }
        self.revision += 1;
        log::debug!(
            "Committed region ({:.1}, {:.1}) r={:.1}, {} total",
            region.x,
            region.y,
            region.radius,
            self.regions.len()
        );
        self.notify();
        Some(region)
    }

    fn discard(&mut self) {
        self.regions.clear();
        self.drawing = None;
        self.preview = None;
        self.revision += 1;
        self.notify();
    }

    fn notify(&mut self) {
        let preview = self.preview;
        for observer in &mut self.observers {
            observer(Redraw {
                regions: &self.regions,
                preview,
            });
        }
    }
}

/// Circle for a drag with its center kept on the photo
fn circle_in_frame(
    convention: CircleConvention,
    mapping: &ViewportMapping,
    start: Point,
    end: Point,
) -> Region {
    let region = convention.circle(start, end);
    let center = mapping.clamp(region.center());
    Region::new(center.x, center.y, region.radius)
}
