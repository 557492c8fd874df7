use futures::future::{AbortHandle, AbortRegistration, Abortable, Aborted};
use image::RgbaImage;

use crate::capture::{Snapshot, SourceImage};
use crate::config::HomesCanvasConfig;
use crate::domain::Region;
use crate::engine::{AiOutcome, AiResponse, EditRequest, RenderService, SubmitError};
use crate::render::{RegionStyle, overlay_image};
use crate::selector::{Redraw, RegionSelector, SelectorSettings};

use super::messages::{CanvasMsg, PointerMsg};

/// Whether a submission is in flight
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Processing,
}

/// Application state for one canvas: the photo, its regions and the last
/// generation result. All mutation goes through `&mut self`.
#[derive(Debug)]
pub struct CanvasSession {
    config: HomesCanvasConfig,
    style: RegionStyle,
    source: Option<SourceImage>,
    selector: RegionSelector,
    snapshot: Option<Snapshot>,
    outcome: Option<AiOutcome>,
    phase: Phase,
    error: Option<String>,
    abort: Option<AbortHandle>,
    /// Bumped whenever derived state is dropped; results from older
    /// submissions are discarded
    generation: u64,
}

/// A submission that passed its preconditions and is ready to be sent
#[derive(Debug)]
pub struct PendingSubmit {
    pub request: EditRequest,
    registration: AbortRegistration,
    handle: AbortHandle,
    generation: u64,
}

/// A submission that came back, tagged with the session state it was sent from
#[derive(Debug)]
pub struct Completed {
    pub result: Result<AiOutcome, SubmitError>,
    generation: u64,
}

impl PendingSubmit {
    /// Handle that cancels this submission from elsewhere
    pub fn abort_handle(&self) -> AbortHandle {
        self.handle.clone()
    }

    /// Send the request and interpret the response
    pub async fn run<S: RenderService>(self, service: &S) -> Completed {
        let call = service.render(&self.request);
        let result = match Abortable::new(call, self.registration).await {
            Ok(response) => response.and_then(AiResponse::into_outcome),
            Err(Aborted) => Err(SubmitError::Cancelled),
        };
        Completed {
            result,
            generation: self.generation,
        }
    }
}

impl CanvasSession {
    pub fn new(config: HomesCanvasConfig) -> Self {
        Self {
            style: RegionStyle::from(&config),
            selector: RegionSelector::new(SelectorSettings::from(&config)),
            config,
            source: None,
            snapshot: None,
            outcome: None,
            phase: Phase::Idle,
            error: None,
            abort: None,
            generation: 0,
        }
    }

    /// Register a redraw observer on the selector
    pub fn on_redraw(&mut self, observer: impl FnMut(Redraw<'_>) + Send + 'static) {
        self.selector.on_redraw(observer);
    }

    pub fn update(&mut self, msg: CanvasMsg) -> anyhow::Result<()> {
        match msg {
            CanvasMsg::Pointer(pointer) => self.handle_pointer(pointer),
            CanvasMsg::ResetRegions => self.reset_regions(),
            CanvasMsg::LoadImage(image) => self.load_image(image),
            CanvasMsg::ClearImage => self.clear_image(),
            CanvasMsg::Confirm => {
                self.confirm()?;
            }
        }
        Ok(())
    }

    fn handle_pointer(&mut self, msg: PointerMsg) {
        match msg {
            PointerMsg::Down(input, display) => {
                self.selector.begin(&input, display);
            }
            PointerMsg::Move(input, display) => {
                self.selector.update(&input, display);
            }
            PointerMsg::Up(input, display) => {
                if self.selector.end(&input, display).is_some() {
                    self.error = None;
                }
            }
            PointerMsg::Leave => self.selector.cancel(),
        }
    }

    /// Replace the photo; everything derived from the previous one is dropped
    pub fn load_image(&mut self, image: SourceImage) {
        self.abort_in_flight();
        let frame = image.frame();
        log::info!("Loaded photo {}x{}", frame.width, frame.height);
        self.selector.load_frame(frame);
        self.source = Some(image);
        self.invalidate();
        self.error = None;
    }

    pub fn clear_image(&mut self) {
        self.abort_in_flight();
        self.selector.unload();
        self.source = None;
        self.invalidate();
        self.error = None;
    }

    pub fn reset_regions(&mut self) {
        self.abort_in_flight();
        self.selector.reset();
        self.invalidate();
    }

    /// Capture the snapshot of the current photo and regions
    pub fn confirm(&mut self) -> anyhow::Result<&Snapshot> {
        let Some(source) = &self.source else {
            anyhow::bail!("No photo loaded");
        };
        let snapshot = Snapshot::capture(
            source,
            self.selector.regions(),
            &self.style,
            self.config.composite_overlay,
            self.selector.revision(),
        )?;
        Ok(self.snapshot.insert(snapshot))
    }

    /// The snapshot, if it still matches the current regions
    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot
            .as_ref()
            .filter(|s| s.is_current(self.selector.revision()))
    }

    /// Check preconditions and switch to `Processing`
    pub fn begin_submit(&mut self) -> Result<PendingSubmit, SubmitError> {
        if self.phase == Phase::Processing {
            return Err(SubmitError::InFlight);
        }
        let request = EditRequest::assemble(
            self.snapshot(),
            self.selector.regions(),
            self.config.axis,
        )
        .inspect_err(|err| {
            log::warn!("Submission refused: {}", err);
            self.error = Some(err.user_message());
        })?;

        let (handle, registration) = AbortHandle::new_pair();
        self.abort = Some(handle.clone());
        self.phase = Phase::Processing;
        self.error = None;
        log::info!(
            "Submitting {} region(s) on a {}x{} photo",
            request.circles.len(),
            request.image_width,
            request.image_height
        );
        Ok(PendingSubmit {
            request,
            registration,
            handle,
            generation: self.generation,
        })
    }

    /// Record the result of a submission and return to `Idle`.
    ///
    /// A result sent before the last reset or photo change is dropped and
    /// reported as `Cancelled`; the session state is left alone.
    pub fn finish_submit(&mut self, completed: Completed) -> Result<&AiOutcome, SubmitError> {
        if completed.generation != self.generation {
            log::debug!(
                "Dropping result of submission {} (session at {})",
                completed.generation,
                self.generation
            );
            return Err(SubmitError::Cancelled);
        }
        self.phase = Phase::Idle;
        self.abort = None;
        match completed.result {
            Ok(outcome) => {
                self.error = None;
                Ok(self.outcome.insert(outcome))
            }
            Err(err) => {
                log::error!("AI interior request failed: {}", err);
                self.error = Some(err.user_message());
                Err(err)
            }
        }
    }

    /// Begin, run and finish a submission
    pub async fn submit<S: RenderService>(
        &mut self,
        service: &S,
    ) -> Result<&AiOutcome, SubmitError> {
        let pending = self.begin_submit()?;
        let completed = pending.run(service).await;
        self.finish_submit(completed)
    }

    /// Abort the in-flight submission, if any
    pub fn cancel(&mut self) {
        if let Some(handle) = &self.abort {
            log::info!("Cancelling AI interior request");
            handle.abort();
        }
    }

    /// Photo with committed regions and the live preview drawn on top
    pub fn overlay(&self) -> Option<RgbaImage> {
        let source = self.source.as_ref()?;
        Some(overlay_image(
            &source.rgba,
            self.selector.regions(),
            self.selector.preview().as_ref(),
            &self.style,
        ))
    }

    pub fn regions(&self) -> &[Region] {
        self.selector.regions()
    }

    pub fn selector(&self) -> &RegionSelector {
        &self.selector
    }

    pub fn source(&self) -> Option<&SourceImage> {
        self.source.as_ref()
    }

    pub fn outcome(&self) -> Option<&AiOutcome> {
        self.outcome.as_ref()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Last message to show the user
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn config(&self) -> &HomesCanvasConfig {
        &self.config
    }

    fn invalidate(&mut self) {
        self.snapshot = None;
        self.outcome = None;
        self.generation += 1;
    }

    fn abort_in_flight(&mut self) {
        if let Some(handle) = self.abort.take() {
            log::debug!("Selection changed while processing, aborting request");
            handle.abort();
        }
        self.phase = Phase::Idle;
    }
}
