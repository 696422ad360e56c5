//! # Comic editor
//!
//! Holds the pages being drafted and drives one generation request at a time.
//!
//! While a request is in flight the editor publishes a simulated progress
//! estimate on a [`tokio::sync::watch`] channel. The estimate advances by a
//! random step on every tick and never passes the configured cap; it carries
//! no information about the real request. When the request settles:
//!
//! | Outcome | Progress | Page | Error |
//! |---------|----------|------|-------|
//! | Success | 100, then 0 after the reset delay | panels stored, marked generated | cleared |
//! | Failure | 0 | untouched | server text, or [`api::GENERATION_UNREACHABLE`] |
//!
//! A successful run is also saved to the library when a user is signed in.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use api::{ApiError, GenerationRequest, GenerationService, LibraryService, NewComic};
use rand::Rng;
use store::config::GenerationConfig;
use tokio::sync::watch;

use crate::templates::{art_style, ART_STYLES};

/// Panel grid of a page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout {
    pub name: &'static str,
    pub cols: u32,
    pub rows: u32,
}

impl Layout {
    pub fn panel_count(&self) -> u32 {
        self.cols.saturating_mul(self.rows)
    }

    pub fn by_name(name: &str) -> Option<Layout> {
        LAYOUTS.iter().copied().find(|l| l.name.eq_ignore_ascii_case(name))
    }
}

pub const LAYOUTS: [Layout; 4] = [
    Layout { name: "Classic", cols: 2, rows: 2 },
    Layout { name: "Strip", cols: 1, rows: 3 },
    Layout { name: "Wide", cols: 3, rows: 2 },
    Layout { name: "Single", cols: 1, rows: 1 },
];

/// Upper bound of one simulated progress step.
const MAX_PROGRESS_STEP: f32 = 8.0;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComicPage {
    pub number: usize,
    pub prompt: String,
    pub generated: bool,
    pub panels: Vec<String>,
}

impl ComicPage {
    fn blank(number: usize) -> Self {
        Self {
            number,
            ..Default::default()
        }
    }
}

/// Snapshot published on the progress channel.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GenerationStatus {
    pub generating: bool,
    /// Percent, 0 to 100.
    pub progress: f32,
}

/// Clears a run that never settled, e.g. because its future was dropped.
struct RunGuard(Arc<watch::Sender<GenerationStatus>>);

impl Drop for RunGuard {
    fn drop(&mut self) {
        self.0.send_if_modified(|status| {
            if !status.generating {
                return false;
            }
            *status = GenerationStatus::default();
            true
        });
    }
}

pub struct EditorView {
    pages: Vec<ComicPage>,
    active: usize,
    style: &'static str,
    layout: Layout,
    error: Option<String>,
    settings: GenerationConfig,
    status: Arc<watch::Sender<GenerationStatus>>,
    run: Arc<AtomicU64>,
}

impl Default for EditorView {
    fn default() -> Self {
        Self::new(GenerationConfig::default())
    }
}

impl EditorView {
    pub fn new(settings: GenerationConfig) -> Self {
        let (status, _) = watch::channel(GenerationStatus::default());
        Self {
            pages: vec![ComicPage::blank(1)],
            active: 0,
            style: ART_STYLES[0].name,
            layout: LAYOUTS[0],
            error: None,
            settings,
            status: Arc::new(status),
            run: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn pages(&self) -> &[ComicPage] {
        &self.pages
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_page(&self) -> &ComicPage {
        &self.pages[self.active]
    }

    /// Append a blank page and select it.
    pub fn add_page(&mut self) {
        self.pages.push(ComicPage::blank(self.pages.len() + 1));
        self.active = self.pages.len() - 1;
    }

    pub fn select_page(&mut self, index: usize) -> bool {
        if index < self.pages.len() {
            self.active = index;
            true
        } else {
            false
        }
    }

    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.pages[self.active].prompt = prompt.into();
    }

    pub fn style(&self) -> &'static str {
        self.style
    }

    /// Pick an art style from [`ART_STYLES`].
    pub fn set_style(&mut self, style: &str) -> bool {
        match art_style(style) {
            Some(s) => {
                self.style = s.name;
                true
            }
            None => false,
        }
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn set_layout(&mut self, layout: Layout) {
        self.layout = layout;
    }

    /// Error from the last failed run.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn status(&self) -> GenerationStatus {
        *self.status.borrow()
    }

    pub fn is_generating(&self) -> bool {
        self.status.borrow().generating
    }

    /// Watch progress updates, e.g. to drive a progress bar.
    pub fn subscribe(&self) -> watch::Receiver<GenerationStatus> {
        self.status.subscribe()
    }

    /// Generate panels for the active page.
    ///
    /// The error is also kept in [`EditorView::error`] for display. Runs
    /// cannot overlap: a run holds `&mut self` until it settles.
    ///
    /// On success the progress reset is scheduled before the comic is saved,
    /// so a slow save delays the return but not the reset.
    pub async fn generate<S>(&mut self, service: &S) -> Result<(), ApiError>
    where
        S: GenerationService + LibraryService,
    {
        let prompt = self.active_page().prompt.trim().to_string();
        if prompt.is_empty() {
            let err = ApiError::InvalidInput("Please enter a prompt".to_string());
            self.error = Some(err.to_string());
            return Err(err);
        }

        let run = self.run.fetch_add(1, Ordering::SeqCst) + 1;
        self.error = None;
        self.status.send_replace(GenerationStatus {
            generating: true,
            progress: 0.0,
        });
        let _guard = RunGuard(self.status.clone());

        let request = GenerationRequest {
            prompt: prompt.clone(),
            style: self.style.to_string(),
            panel_count: self.layout.panel_count(),
        };
        tracing::info!(
            style = %request.style,
            panels = request.panel_count,
            "Generating page {}",
            self.active_page().number
        );

        let result = self.await_with_progress(service.generate(&request)).await;

        match result {
            Ok(panels) => {
                self.status.send_replace(GenerationStatus {
                    generating: false,
                    progress: 100.0,
                });
                let page = &mut self.pages[self.active];
                page.panels = panels.clone();
                page.generated = true;
                tracing::info!(panels = panels.len(), "Generation finished");
                self.schedule_reset(run);

                if service.identify().is_some() {
                    let comic = NewComic::from_generation(&prompt, self.style, panels);
                    if let Err(e) = service.save_comic(&comic).await {
                        tracing::warn!("Failed to save comic: {}", e);
                    }
                }
                Ok(())
            }
            Err(e) => {
                let message = e.generation_message();
                tracing::error!("Generation failed: {}", message);
                self.error = Some(message);
                self.status.send_replace(GenerationStatus::default());
                self.schedule_reset(run);
                Err(e)
            }
        }
    }

    async fn await_with_progress<T>(&self, request: impl std::future::Future<Output = T>) -> T {
        let tick = Duration::from_millis(self.settings.progress_tick_ms.max(1));
        let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + tick, tick);
        tokio::pin!(request);
        loop {
            tokio::select! {
                result = &mut request => return result,
                _ = ticker.tick() => self.advance_progress(),
            }
        }
    }

    fn advance_progress(&self) {
        let step = rand::thread_rng().gen_range(0.0..MAX_PROGRESS_STEP);
        let cap = self.settings.progress_cap;
        self.status.send_modify(|status| {
            status.progress = (status.progress + step).min(cap).max(status.progress);
        });
    }

    /// Drop progress back to zero after the reset delay, unless a newer run
    /// has started by then.
    fn schedule_reset(&self, run: u64) {
        let status = self.status.clone();
        let current = self.run.clone();
        let delay = Duration::from_millis(self.settings.reset_delay_ms);
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if current.load(Ordering::SeqCst) == run {
                status.send_modify(|s| s.progress = 0.0);
            }
        });
    }
}
