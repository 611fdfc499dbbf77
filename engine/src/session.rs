use log::{error, info, warn};

use crate::{ErrorNotice, GenerationError, GenerationRequest, GenerationResult, SelectedImage};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiStatus {
    #[default]
    Idle,
    Dragging,
    Loading,
}

/// The outcome of the latest generation. Result and error share one slot so they can't coexist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Generated(GenerationResult),
    Failed(ErrorNotice),
}

/// What the result area should show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Display<'a> {
    Placeholder,
    Result(&'a GenerationResult),
    Error(&'a ErrorNotice),
}

/// State of the portrait generator view.
///
/// Every selection change bumps `epoch`. A generation request remembers the epoch it was
/// issued for, and its outcome is only kept if the selection hasn't changed in the meantime.
#[derive(Debug, Default)]
pub struct Session {
    selected: Option<SelectedImage>,
    outcome: Option<Outcome>,
    dragging: bool,
    loading: bool,
    epoch: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> UiStatus {
        if self.loading {
            UiStatus::Loading
        } else if self.dragging {
            UiStatus::Dragging
        } else {
            UiStatus::Idle
        }
    }

    pub fn selected(&self) -> Option<&SelectedImage> {
        self.selected.as_ref()
    }

    pub fn result(&self) -> Option<&GenerationResult> {
        match &self.outcome {
            Some(Outcome::Generated(r)) => Some(r),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ErrorNotice> {
        match &self.outcome {
            Some(Outcome::Failed(e)) => Some(e),
            _ => None,
        }
    }

    pub fn display(&self) -> Display<'_> {
        match &self.outcome {
            None => Display::Placeholder,
            Some(Outcome::Generated(r)) => Display::Result(r),
            Some(Outcome::Failed(e)) => Display::Error(e),
        }
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn can_generate(&self) -> bool {
        self.selected.is_some() && !self.loading
    }

    pub fn drag_entered(&mut self) {
        self.dragging = true;
    }

    pub fn drag_left(&mut self) {
        self.dragging = false;
    }

    /// Replaces the selection. Any result or error belonged to the old one and is dropped.
    pub fn select(&mut self, image: SelectedImage) {
        info!("Selected {} ({} bytes)", image.file_name, image.data.len());
        self.dragging = false;
        self.selected = Some(image);
        self.outcome = None;
        self.epoch += 1;
    }

    pub fn clear(&mut self) {
        info!("Selection cleared");
        self.selected = None;
        self.outcome = None;
        self.epoch += 1;
    }

    /// Returns `None` if there is nothing to submit or a request is already running.
    pub fn begin_generation(&mut self) -> Option<GenerationRequest> {
        if !self.can_generate() {
            return None;
        }
        let image = self.selected.clone()?;
        self.loading = true;
        self.outcome = None;
        Some(GenerationRequest {
            epoch: self.epoch,
            image,
        })
    }

    pub fn complete_generation(
        &mut self,
        epoch: u64,
        outcome: Result<GenerationResult, GenerationError>,
    ) {
        self.loading = false;

        if epoch != self.epoch {
            warn!(
                "Discarding generation outcome for selection {epoch}, current is {}",
                self.epoch
            );
            return;
        }

        self.outcome = Some(match outcome {
            Ok(result) => {
                info!("Generated {}", result.url);
                Outcome::Generated(result)
            }
            Err(e) => {
                error!("Generation failed: {e}");
                Outcome::Failed(e.notice())
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ImageModel, image_model::GenerationFuture};

    /// Answers every request with the same canned outcome
    struct CannedModel(Result<GenerationResult, GenerationError>);

    impl ImageModel for CannedModel {
        fn generate(&self, _image: SelectedImage) -> GenerationFuture<'static> {
            let outcome = self.0.clone();
            Box::pin(async move { outcome })
        }
    }

    fn photo(name: &str) -> SelectedImage {
        SelectedImage::new(vec![0u8; 16], name, mime::IMAGE_JPEG)
    }

    async fn run(session: &mut Session, model: &dyn ImageModel) {
        let req = session
            .begin_generation()
            .expect("generation should be allowed");
        assert_eq!(session.status(), UiStatus::Loading);
        let outcome = model.generate(req.image).await;
        session.complete_generation(req.epoch, outcome);
    }

    #[test]
    fn empty_session() {
        let session = Session::new();
        assert_eq!(session.status(), UiStatus::Idle);
        assert_eq!(session.display(), Display::Placeholder);
        assert!(!session.can_generate());
    }

    #[test]
    fn selection_enables_generation() {
        let mut session = Session::new();
        session.select(photo("a.jpg"));
        assert!(session.selected().is_some());
        assert!(session.result().is_none());
        assert!(session.error().is_none());
        assert!(session.can_generate());
    }

    #[test]
    fn no_generation_without_selection() {
        let mut session = Session::new();
        assert!(session.begin_generation().is_none());
        assert_eq!(session.status(), UiStatus::Idle);
    }

    #[test]
    fn no_second_generation_while_loading() {
        let mut session = Session::new();
        session.select(photo("a.jpg"));
        assert!(session.begin_generation().is_some());
        assert!(!session.can_generate());
        assert!(session.begin_generation().is_none());
        assert_eq!(session.status(), UiStatus::Loading);
    }

    #[test]
    fn drag_state() {
        let mut session = Session::new();
        session.drag_entered();
        assert_eq!(session.status(), UiStatus::Dragging);
        session.drag_left();
        assert_eq!(session.status(), UiStatus::Idle);

        session.drag_entered();
        session.select(photo("dropped.png"));
        assert_eq!(session.status(), UiStatus::Idle);
    }

    #[test]
    fn loading_wins_over_dragging() {
        let mut session = Session::new();
        session.select(photo("a.jpg"));
        session.begin_generation();
        session.drag_entered();
        assert_eq!(session.status(), UiStatus::Loading);
    }

    #[tokio::test]
    async fn array_result() {
        let mut session = Session::new();
        session.select(photo("a.jpg"));
        let model = CannedModel(Ok(GenerationResult::new("https://x/img.png")));
        run(&mut session, &model).await;

        assert_eq!(
            session.result().map(|r| r.url.as_str()),
            Some("https://x/img.png")
        );
        assert!(session.error().is_none());
        assert_eq!(session.status(), UiStatus::Idle);
    }

    #[tokio::test]
    async fn invalid_format() {
        let mut session = Session::new();
        session.select(photo("a.jpg"));
        run(
            &mut session,
            &CannedModel(Err(GenerationError::InvalidResponseFormat)),
        )
        .await;

        let err = session.error().expect("error expected");
        assert_eq!(err.title, "Generation Failed");
        assert!(err.message.contains("Invalid response format"));
        assert!(session.result().is_none());
        assert_eq!(session.status(), UiStatus::Idle);
    }

    #[tokio::test]
    async fn payment_required() {
        let mut session = Session::new();
        session.select(photo("a.jpg"));
        run(
            &mut session,
            &CannedModel(Err(GenerationError::from_detail("PAYMENT_REQUIRED"))),
        )
        .await;

        assert_eq!(
            session.error().map(|e| e.title.as_str()),
            Some("Insufficient Credits")
        );
        assert_eq!(session.status(), UiStatus::Idle);
    }

    #[tokio::test]
    async fn new_selection_clears_previous_outcome() {
        let mut session = Session::new();
        session.select(photo("a.jpg"));
        run(
            &mut session,
            &CannedModel(Ok(GenerationResult::new("https://x/img.png"))),
        )
        .await;
        assert!(session.result().is_some());

        session.select(photo("b.jpg"));
        assert_eq!(session.display(), Display::Placeholder);
        assert!(session.can_generate());
    }

    #[tokio::test]
    async fn retry_replaces_error_with_result() {
        let mut session = Session::new();
        session.select(photo("a.jpg"));
        run(
            &mut session,
            &CannedModel(Err(GenerationError::Transport("timeout".into()))),
        )
        .await;
        assert!(session.error().is_some());

        let req = session.begin_generation().expect("retry allowed");
        assert!(session.error().is_none());
        session.complete_generation(req.epoch, Ok(GenerationResult::new("https://x/2.png")));
        assert!(session.error().is_none());
        assert_eq!(
            session.result().map(|r| r.url.as_str()),
            Some("https://x/2.png")
        );
    }

    #[test]
    fn stale_outcome_is_discarded() {
        let mut session = Session::new();
        session.select(photo("a.jpg"));
        let req = session.begin_generation().expect("generation allowed");

        session.select(photo("b.jpg"));
        session.complete_generation(req.epoch, Ok(GenerationResult::new("https://x/a.png")));

        assert_eq!(session.display(), Display::Placeholder);
        assert_eq!(session.status(), UiStatus::Idle);
        assert!(session.can_generate());
    }

    #[test]
    fn clear_resets_everything() {
        let mut session = Session::new();
        session.select(photo("a.jpg"));
        let req = session.begin_generation().expect("generation allowed");
        session.complete_generation(req.epoch, Err(GenerationError::InvalidResponseFormat));

        session.clear();
        assert!(session.selected().is_none());
        assert_eq!(session.display(), Display::Placeholder);
        assert!(!session.can_generate());
    }
}
