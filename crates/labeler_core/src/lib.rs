//! Core of the box labeling tool: folder scanning, drag-to-box capture and
//! append-only label files. Nothing here touches a window.

pub mod config;
pub mod draft;
pub mod error;
pub mod image_set;
pub mod label_store;
pub mod labeler;
pub mod loader;
pub mod record;

pub use config::{AnnotatorConfig, OverlayStyle};
pub use draft::{AnnotationSession, DraftState, Release};
pub use error::LabelError;
pub use image_set::{ImageEntry, ImageSet, ScanOptions, Step};
pub use label_store::LabelStore;
pub use labeler::{Commit, CurrentView, Labeler, Notice, NoticeLevel};
pub use loader::{ImageLoader, OrientedRgbLoader};
pub use record::{BoundingBoxRecord, Point, Rect, RecordParseError};
