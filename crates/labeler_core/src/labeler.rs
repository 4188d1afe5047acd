//! The labeling session: which image is shown, what is drawn over it, and
//! what happens when a box is committed.

use crate::config::AnnotatorConfig;
use crate::draft::{AnnotationSession, Release};
use crate::error::Result;
use crate::image_set::{ImageEntry, ImageSet, Step};
use crate::label_store::LabelStore;
use crate::loader::ImageLoader;
use crate::record::{BoundingBoxRecord, Point, Rect};
use image::RgbImage;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};

pub const END_OF_SEQUENCE: &str = "End of image list.";
pub const NO_LABEL_ENTERED: &str = "No label entered.";
pub const LABEL_HAS_WHITESPACE: &str = "Label must be a single word without spaces.";
pub const NO_VIEWABLE_IMAGES: &str = "No viewable images remain.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// A message the user has to acknowledge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub message: String,
}

/// The decoded current image and the boxes already stored for it.
#[derive(Debug, Clone)]
pub struct CurrentView {
    pub entry: ImageEntry,
    pub image: RgbImage,
    pub overlays: Vec<BoundingBoxRecord>,
}

impl CurrentView {
    /// Size of the scrollable drawing surface.
    pub fn extent(&self) -> (u32, u32) {
        self.image.dimensions()
    }
}

/// Outcome of answering the label prompt.
#[derive(Debug, Clone, PartialEq)]
pub enum Commit {
    /// No draft was waiting for a label.
    NotPending,
    /// Empty, cancelled or unusable label; draft dropped.
    Rejected,
    Saved(PathBuf),
    /// Write failed; the draft is still waiting so the label can be re-entered.
    Failed,
}

pub struct Labeler<L: ImageLoader> {
    images: ImageSet,
    store: LabelStore,
    loader: L,
    draft: AnnotationSession,
    view: Option<CurrentView>,
    notices: VecDeque<Notice>,
    generation: u64,
    max_extent: Option<u32>,
}

impl<L: ImageLoader> Labeler<L> {
    /// Opens the label directory, scans `image_dir` and shows the first
    /// viewable image.
    pub fn open(image_dir: impl AsRef<Path>, config: &AnnotatorConfig, loader: L) -> Result<Self> {
        let store = LabelStore::open(&config.labels_dir)?;
        let images = ImageSet::scan(image_dir, &config.scan_options())?;
        Ok(Self::new(images, store, loader))
    }

    pub fn new(images: ImageSet, store: LabelStore, loader: L) -> Self {
        let mut labeler = Self {
            images,
            store,
            loader,
            draft: AnnotationSession::new(),
            view: None,
            notices: VecDeque::new(),
            generation: 0,
            max_extent: None,
        };
        labeler.enter_current();
        labeler
    }

    pub fn images(&self) -> &ImageSet {
        &self.images
    }

    pub fn store(&self) -> &LabelStore {
        &self.store
    }

    pub fn current(&self) -> &ImageEntry {
        self.images.current()
    }

    pub fn view(&self) -> Option<&CurrentView> {
        self.view.as_ref()
    }

    /// Bumped every time a different image is entered.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn draft_rect(&self) -> Option<Rect> {
        self.draft.draft_rect()
    }

    pub fn awaiting_label(&self) -> bool {
        self.draft.is_committing()
    }

    /// Caps the width and height an image may have to be shown. An image
    /// over the cap is handled like one that failed to decode, including the
    /// one currently on screen.
    pub fn set_max_extent(&mut self, side: Option<u32>) {
        if self.max_extent == side {
            return;
        }
        self.max_extent = side;
        let oversized = self
            .view
            .as_ref()
            .is_some_and(|v| self.exceeds_max_extent(v.extent()));
        if oversized && !self.awaiting_label() {
            self.enter_current();
        }
    }

    fn exceeds_max_extent(&self, (w, h): (u32, u32)) -> bool {
        self.max_extent.is_some_and(|side| w > side || h > side)
    }

    fn load_viewable(&self, path: &Path) -> anyhow::Result<RgbImage> {
        let image = self.loader.load(path)?;
        if self.exceeds_max_extent(image.dimensions()) {
            let (w, h) = image.dimensions();
            anyhow::bail!(
                "{w}x{h} exceeds the largest displayable size of {} pixels per side",
                self.max_extent.unwrap_or_default()
            );
        }
        Ok(image)
    }

    pub fn drain_notices(&mut self) -> Vec<Notice> {
        self.notices.drain(..).collect()
    }

    pub fn next_image(&mut self) -> Step {
        if self.awaiting_label() {
            return Step::Blocked;
        }
        let step = self.images.advance();
        match step {
            Step::Moved => self.enter_current(),
            _ => self.notify_end(),
        }
        step
    }

    pub fn prev_image(&mut self) -> Step {
        if self.awaiting_label() {
            return Step::Blocked;
        }
        let step = self.images.retreat();
        if step == Step::Moved {
            self.enter_current();
        }
        step
    }

    pub fn press(&mut self, at: Point) {
        if self.view.is_some() {
            self.draft.press(at);
        }
    }

    pub fn drag(&mut self, to: Point) {
        self.draft.drag(to);
    }

    pub fn release(&mut self, at: Point) -> Release {
        self.draft.release(at)
    }

    /// Answers the label prompt. `None` means the prompt was dismissed.
    pub fn submit_label(&mut self, label: Option<&str>) -> Commit {
        let Some(rect) = self.draft.pending_rect() else {
            return Commit::NotPending;
        };
        let label = label.map(str::trim).unwrap_or_default();
        if label.is_empty() {
            self.reject(NO_LABEL_ENTERED);
            return Commit::Rejected;
        }
        if label.contains(char::is_whitespace) {
            self.reject(LABEL_HAS_WHITESPACE);
            return Commit::Rejected;
        }
        let Some(view) = &self.view else {
            self.draft.clear();
            return Commit::NotPending;
        };

        let record = BoundingBoxRecord::new(label, rect);
        match self.store.append(&view.entry.filename, &record) {
            Ok(path) => {
                self.draft.clear();
                if self.next_image() != Step::Moved {
                    self.refresh_overlays();
                }
                Commit::Saved(path)
            }
            Err(e) => {
                tracing::warn!("append failed: {e}");
                self.push_notice(
                    NoticeLevel::Error,
                    "Error",
                    format!("Could not save label: {e}"),
                );
                Commit::Failed
            }
        }
    }

    fn reject(&mut self, reason: &str) {
        self.draft.clear();
        self.push_notice(NoticeLevel::Warning, "Warning", reason);
    }

    /// Shows the current image, skipping forward past images that fail to
    /// decode. Gives up after one pass over the list.
    fn enter_current(&mut self) {
        self.draft.clear();
        self.view = None;
        self.generation += 1;

        for _ in 0..self.images.len() {
            let entry = self.images.current().clone();
            match self.load_viewable(&entry.path) {
                Ok(image) => {
                    let overlays = self.load_overlays(&entry);
                    tracing::info!(
                        "showing {} ({}/{}, {} boxes)",
                        entry.filename,
                        self.images.index() + 1,
                        self.images.len(),
                        overlays.len()
                    );
                    self.view = Some(CurrentView {
                        entry,
                        image,
                        overlays,
                    });
                    return;
                }
                Err(e) => {
                    tracing::warn!("failed to load {}: {e:#}", entry.path.display());
                    self.push_notice(
                        NoticeLevel::Error,
                        "Error",
                        format!("Could not load image {}: {e:#}", entry.path.display()),
                    );
                    if self.images.advance() != Step::Moved {
                        self.notify_end();
                        break;
                    }
                }
            }
        }
        self.push_notice(NoticeLevel::Error, "Error", NO_VIEWABLE_IMAGES);
    }

    fn load_overlays(&mut self, entry: &ImageEntry) -> Vec<BoundingBoxRecord> {
        match self.store.records_for(&entry.filename) {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!("label file for {} unreadable: {e}", entry.filename);
                self.push_notice(
                    NoticeLevel::Error,
                    "Error",
                    format!("Could not read labels for {}: {e}", entry.filename),
                );
                Vec::new()
            }
        }
    }

    fn refresh_overlays(&mut self) {
        let Some(entry) = self.view.as_ref().map(|v| v.entry.clone()) else {
            return;
        };
        let overlays = self.load_overlays(&entry);
        if let Some(view) = self.view.as_mut() {
            view.overlays = overlays;
        }
    }

    fn notify_end(&mut self) {
        self.push_notice(NoticeLevel::Info, "Info", END_OF_SEQUENCE);
    }

    fn push_notice(&mut self, level: NoticeLevel, title: &str, message: impl Into<String>) {
        self.notices.push_back(Notice {
            level,
            title: title.to_string(),
            message: message.into(),
        });
    }
}
