//! Drag gesture tracking for the rectangle being drawn.

use crate::record::{Point, Rect};

/// Where the current gesture stands.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DraftState {
    #[default]
    Idle,
    Dragging { start: Point, current: Point },
    /// Released with a usable rectangle; waiting on the label prompt.
    Committing { rect: Rect },
}

/// What a pointer release produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Release {
    /// No drag was in progress.
    Ignored,
    /// Zero width or height; draft dropped without prompting.
    Discarded,
    AwaitingLabel(Rect),
}

/// Holds the in-progress rectangle between press and label entry.
#[derive(Debug, Clone, Default)]
pub struct AnnotationSession {
    state: DraftState,
}

impl AnnotationSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DraftState {
        self.state
    }

    pub fn is_committing(&self) -> bool {
        matches!(self.state, DraftState::Committing { .. })
    }

    /// Starts a zero-sized draft. Ignored while a label is being asked for.
    pub fn press(&mut self, at: Point) {
        if self.is_committing() {
            return;
        }
        tracing::debug!("draft started at ({}, {})", at.x, at.y);
        self.state = DraftState::Dragging {
            start: at,
            current: at,
        };
    }

    pub fn drag(&mut self, to: Point) {
        if let DraftState::Dragging { current, .. } = &mut self.state {
            *current = to;
        }
    }

    pub fn release(&mut self, at: Point) -> Release {
        let DraftState::Dragging { start, .. } = self.state else {
            return Release::Ignored;
        };
        let rect = Rect::from_corners(start, at);
        if rect.has_area() {
            self.state = DraftState::Committing { rect };
            Release::AwaitingLabel(rect)
        } else {
            tracing::debug!("zero-area draft discarded");
            self.state = DraftState::Idle;
            Release::Discarded
        }
    }

    /// Rectangle to draw for the current draft, if any.
    pub fn draft_rect(&self) -> Option<Rect> {
        match self.state {
            DraftState::Idle => None,
            DraftState::Dragging { start, current } => Some(Rect::from_corners(start, current)),
            DraftState::Committing { rect } => Some(rect),
        }
    }

    pub fn pending_rect(&self) -> Option<Rect> {
        match self.state {
            DraftState::Committing { rect } => Some(rect),
            _ => None,
        }
    }

    pub fn clear(&mut self) {
        self.state = DraftState::Idle;
    }
}
