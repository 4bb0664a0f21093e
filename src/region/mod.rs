//! Placement region: the draggable, resizable content rectangle
//!
//! The region's width and height are the page content budget; its position
//! only places the content box inside the page canvas. Pointer handling is a
//! small state machine:
//!
//! ```text
//! Idle --begin_drag--> Dragging --end_interaction--> Idle
//! Idle --begin_resize--> Resizing --end_interaction--> Idle
//! ```
//!
//! Pointer coordinates are expected from global tracking, so a release
//! outside the region still ends the interaction.

use crate::layout::Budget;
use crate::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Smallest width or height a resize may produce
pub const MIN_SIZE: f32 = 100.0;

/// Current pointer interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InteractionMode {
    #[default]
    Idle,
    Dragging,
    Resizing,
}

/// Snapshot taken when an interaction starts; moves are computed against it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    pub pointer_start: Point,
    pub region_start: Rect,
}

/// A geometry update produced by a pointer move or an explicit set
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryChange {
    pub previous: Rect,
    pub current: Rect,
}

impl GeometryChange {
    /// Whether the content budget (width/height) changed
    pub fn budget_changed(&self) -> bool {
        self.previous.width != self.current.width || self.previous.height != self.current.height
    }

    /// Whether the content box moved
    pub fn moved(&self) -> bool {
        self.previous.x != self.current.x || self.previous.y != self.current.y
    }
}

/// The interactive content rectangle
#[derive(Debug, Clone)]
pub struct PlacementRegion {
    rect: Rect,
    mode: InteractionMode,
    anchor: Option<Anchor>,
    enabled: bool,
    min_size: f32,
}

impl Default for PlacementRegion {
    fn default() -> Self {
        Self::new(Rect::new(80.0, 120.0, 630.0, 850.0))
    }
}

impl PlacementRegion {
    /// Create an enabled region with the default size floor
    pub fn new(rect: Rect) -> Self {
        Self::with_min_size(rect, MIN_SIZE)
    }

    /// Create an enabled region with a custom size floor
    pub fn with_min_size(rect: Rect, min_size: f32) -> Self {
        let min_size = if min_size.is_finite() && min_size > 0.0 {
            min_size
        } else {
            MIN_SIZE
        };
        Self {
            rect: clamp_size(rect, min_size),
            mode: InteractionMode::Idle,
            anchor: None,
            enabled: true,
            min_size,
        }
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Content budget derived from the region size
    pub fn budget(&self) -> Budget {
        Budget {
            width: self.rect.width,
            height: self.rect.height,
        }
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn min_size(&self) -> f32 {
        self.min_size
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_interacting(&self) -> bool {
        self.mode != InteractionMode::Idle
    }

    /// Whether `pointer` is over the region
    pub fn contains(&self, pointer: Point) -> bool {
        self.rect.contains_point(pointer)
    }

    /// Start moving the region. No-op unless idle and enabled.
    pub fn begin_drag(&mut self, pointer: Point) -> bool {
        self.begin(InteractionMode::Dragging, pointer)
    }

    /// Start resizing from the bottom-right handle. No-op unless idle and enabled.
    pub fn begin_resize(&mut self, pointer: Point) -> bool {
        self.begin(InteractionMode::Resizing, pointer)
    }

    fn begin(&mut self, mode: InteractionMode, pointer: Point) -> bool {
        if !self.enabled || self.is_interacting() || !is_finite(pointer) {
            return false;
        }
        self.mode = mode;
        self.anchor = Some(Anchor {
            pointer_start: pointer,
            region_start: self.rect,
        });
        true
    }

    /// Apply a pointer move. Returns the change, if any.
    pub fn on_pointer_move(&mut self, pointer: Point) -> Option<GeometryChange> {
        if !is_finite(pointer) {
            return None;
        }
        let anchor = self.anchor?;
        let dx = pointer.x - anchor.pointer_start.x;
        let dy = pointer.y - anchor.pointer_start.y;
        let start = anchor.region_start;

        let next = match self.mode {
            InteractionMode::Idle => return None,
            InteractionMode::Dragging => Rect::new(start.x + dx, start.y + dy, start.width, start.height),
            InteractionMode::Resizing => Rect::new(
                start.x,
                start.y,
                (start.width + dx).max(self.min_size),
                (start.height + dy).max(self.min_size),
            ),
        };

        self.replace(next)
    }

    /// Return to idle. Safe to call in any state.
    pub fn end_interaction(&mut self) {
        self.mode = InteractionMode::Idle;
        self.anchor = None;
    }

    /// Freeze the region; any interaction in progress ends
    pub fn disable(&mut self) {
        self.end_interaction();
        self.enabled = false;
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }

    /// Set geometry directly, clamped to the size floor. Ends any interaction.
    pub fn set_rect(&mut self, rect: Rect) -> Option<GeometryChange> {
        if ![rect.x, rect.y, rect.width, rect.height]
            .iter()
            .all(|v| v.is_finite())
        {
            return None;
        }
        self.end_interaction();
        self.replace(clamp_size(rect, self.min_size))
    }

    fn replace(&mut self, next: Rect) -> Option<GeometryChange> {
        if next == self.rect {
            return None;
        }
        let change = GeometryChange {
            previous: self.rect,
            current: next,
        };
        self.rect = next;
        Some(change)
    }
}

fn is_finite(p: Point) -> bool {
    p.x.is_finite() && p.y.is_finite()
}

fn clamp_size(rect: Rect, min_size: f32) -> Rect {
    Rect::new(
        rect.x,
        rect.y,
        rect.width.max(min_size),
        rect.height.max(min_size),
    )
}
