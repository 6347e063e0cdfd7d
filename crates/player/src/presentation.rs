// Presentation mediator: inline/fullscreen geometry and transition plans

use std::time::Duration;

use castkit_core::{PlayerError, Result};

/// Walking further than this up the ancestry means the host layout is
/// malformed, not deep.
pub const MAX_ANCESTOR_DEPTH: usize = 32;

/// Present animation duration; dismiss is shorter on purpose so collapsing
/// feels snappier.
pub const PRESENT_DURATION: Duration = Duration::from_millis(200);
pub const DISMISS_DURATION: Duration = Duration::from_millis(100);

/// Opaque identity of a view in the host's tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewId(pub u64);

/// Axis-aligned rectangle in view coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn mid_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    pub fn mid_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    /// Component-wise linear interpolation towards `other`.
    pub fn lerp(&self, other: &Rect, t: f64) -> Rect {
        let t = t.clamp(0.0, 1.0);
        Rect {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
            width: self.width + (other.width - self.width) * t,
            height: self.height + (other.height - self.height) * t,
        }
    }
}

/// Read-only query capability over the host's view hierarchy.
pub trait ViewTree {
    /// Frame of a view in its parent's coordinate space
    fn frame(&self, view: ViewId) -> Rect;

    /// Parent view, `None` at the root
    fn parent(&self, view: ViewId) -> Option<ViewId>;

    /// Convert a rect from a view's coordinate space into its parent's
    fn convert_to_parent(&self, view: ViewId, rect: Rect) -> Rect;

    /// Whether a view is the root player surface
    fn is_player_surface(&self, view: ViewId) -> bool;
}

/// Rect of the inline display region relative to the player surface.
///
/// Walks up the ancestry converting coordinates at each level until the
/// player surface is reached. A malformed host layout (surface never found,
/// or nesting deeper than [`MAX_ANCESTOR_DEPTH`]) yields
/// [`PlayerError::MissingAncestor`] so the host can fail loudly on its own
/// terms.
pub fn display_rect_in_surface(tree: &dyn ViewTree, display: ViewId) -> Result<Rect> {
    let mut rect = tree.frame(display);
    let mut view = display;

    for _ in 0..MAX_ANCESTOR_DEPTH {
        let Some(parent) = tree.parent(view) else {
            return Err(PlayerError::MissingAncestor);
        };
        if tree.is_player_surface(parent) {
            return Ok(rect);
        }
        // `rect` is in `parent`'s space here; lift it into the grandparent's.
        rect = tree.convert_to_parent(parent, rect);
        view = parent;
    }

    Err(PlayerError::MissingAncestor)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    Present,
    Dismiss,
}

/// A fixed-duration scale/translate plan between the inline rect and the
/// fullscreen rect. Pure data; the host drives the actual animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionPlan {
    pub kind: TransitionKind,
    pub duration: Duration,
    pub from: Rect,
    pub to: Rect,
}

impl TransitionPlan {
    /// Expand from the inline display rect to the fullscreen rect.
    pub fn present(inline: Rect, fullscreen: Rect) -> Self {
        Self {
            kind: TransitionKind::Present,
            duration: PRESENT_DURATION,
            from: inline,
            to: fullscreen,
        }
    }

    /// Collapse from the fullscreen rect back to the inline display rect.
    pub fn dismiss(fullscreen: Rect, inline: Rect) -> Self {
        Self {
            kind: TransitionKind::Dismiss,
            duration: DISMISS_DURATION,
            from: fullscreen,
            to: inline,
        }
    }

    /// Interpolated frame at a normalized time `t` in `[0, 1]`.
    pub fn frame_at(&self, t: f64) -> Rect {
        self.from.lerp(&self.to, t)
    }

    /// Scale factors applied to the destination view at the start of the
    /// animation.
    pub fn initial_scale(&self) -> (f64, f64) {
        if self.to.width <= 0.0 || self.to.height <= 0.0 {
            return (1.0, 1.0);
        }
        (
            self.from.width / self.to.width,
            self.from.height / self.to.height,
        )
    }
}
