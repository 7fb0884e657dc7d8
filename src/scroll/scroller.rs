//! Drag interaction state machine

use crate::error::{PpgReportError, Result};
use crate::scroll::surface::{Cursor, Engine, OverflowDetection, ScrollPoint, ScrollSurface};

/// Animated scrolls land on fractional pixel positions, so settling is
/// detected within half a pixel rather than by exact comparison.
const SETTLE_EPSILON: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
struct DragSession {
    start_scroll_offset: ScrollPoint,
    start_pointer_position: ScrollPoint,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Idle,
    Dragging(DragSession),
    Settling { target: f64 },
}

/// Click/touch-drag scrolling with release-to-snap for one container.
///
/// At most one drag session is active at a time; a pointer-down while a
/// session exists is ignored. All transitions verify the surface is still
/// mounted and fail with a validation error otherwise.
pub struct DragScroller<S: ScrollSurface> {
    surface: S,
    drag_supported: bool,
    detection: OverflowDetection,
    overflowing: bool,
    phase: Phase,
}

impl<S: ScrollSurface> DragScroller<S> {
    pub fn new(surface: S, engine: Engine, detection: OverflowDetection) -> Result<Self> {
        if !surface.is_mounted() {
            return Err(PpgReportError::validation("scroll container is not mounted"));
        }

        let mut scroller = Self {
            surface,
            drag_supported: engine.supports_drag_snap(),
            detection,
            overflowing: false,
            phase: Phase::Idle,
        };
        scroller.refresh_overflow();
        Ok(scroller)
    }

    /// Whether dragging is available at all on the hosting engine
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.drag_supported
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, Phase::Dragging(_))
    }

    #[must_use]
    pub fn is_settling(&self) -> bool {
        matches!(self.phase, Phase::Settling { .. })
    }

    /// Notification that the strip's content changed size.
    pub fn content_resized(&mut self) -> Result<()> {
        self.ensure_mounted()?;
        if self.detection == OverflowDetection::Observed {
            self.refresh_overflow();
        }
        Ok(())
    }

    /// Pointer pressed inside the container.
    pub fn pointer_down(&mut self, position: ScrollPoint) -> Result<()> {
        self.ensure_mounted()?;
        if !self.drag_supported || !self.overflowing {
            return Ok(());
        }
        if !matches!(self.phase, Phase::Idle) {
            return Ok(());
        }

        let session = DragSession {
            start_scroll_offset: self.surface.scroll_offset(),
            start_pointer_position: position,
        };
        self.surface.acquire_drag_listeners();
        self.surface.set_snap_enabled(false);
        self.surface.set_selection_enabled(false);
        self.surface.set_cursor(Cursor::Grabbing);
        self.phase = Phase::Dragging(session);
        Ok(())
    }

    /// Pointer moved during an active drag.
    pub fn pointer_move(&mut self, position: ScrollPoint) -> Result<()> {
        self.ensure_mounted()?;
        let Phase::Dragging(session) = self.phase else {
            return Ok(());
        };

        // Dragging right moves the content left: the pointer delta is
        // applied to the scroll offset inverted.
        let offset = ScrollPoint {
            x: session.start_scroll_offset.x + (session.start_pointer_position.x - position.x),
            y: session.start_scroll_offset.y + (session.start_pointer_position.y - position.y),
        };
        self.surface.set_scroll_offset(offset);
        Ok(())
    }

    /// Pointer released; settle on the nearest snap child.
    pub fn pointer_up(&mut self) -> Result<()> {
        self.ensure_mounted()?;
        if !matches!(self.phase, Phase::Dragging(_)) {
            return Ok(());
        }

        self.surface.release_drag_listeners();
        self.surface.set_selection_enabled(true);
        self.surface.set_cursor(self.idle_cursor());

        let position = self.surface.scroll_offset().x;
        match nearest_snap_offset(&self.surface.child_offsets(), position) {
            Some(target) if (target - position).abs() > SETTLE_EPSILON => {
                // Native snap stays off until the animation lands, otherwise
                // it would grab the scroll mid-flight.
                self.surface.begin_smooth_scroll(target);
                self.phase = Phase::Settling { target };
            }
            _ => {
                // Already aligned, or nothing to snap to
                self.surface.set_snap_enabled(true);
                self.phase = Phase::Idle;
            }
        }
        Ok(())
    }

    /// Settle check, driven by the embedder's scroll events.
    ///
    /// Returns true once the machine is idle with native snap restored.
    pub fn poll_settled(&mut self) -> Result<bool> {
        self.ensure_mounted()?;
        match self.phase {
            Phase::Idle => Ok(true),
            Phase::Dragging(_) => Ok(false),
            Phase::Settling { target } => {
                if (self.surface.scroll_offset().x - target).abs() <= SETTLE_EPSILON {
                    self.surface.set_snap_enabled(true);
                    self.phase = Phase::Idle;
                    Ok(true)
                } else {
                    Ok(false)
                }
            }
        }
    }

    fn ensure_mounted(&self) -> Result<()> {
        if self.surface.is_mounted() {
            Ok(())
        } else {
            Err(PpgReportError::validation("scroll container is not mounted"))
        }
    }

    fn refresh_overflow(&mut self) {
        self.overflowing = match self.detection {
            OverflowDetection::Assumed => true,
            OverflowDetection::Observed => {
                self.surface.content_width() > self.surface.viewport_width()
            }
        };
        if matches!(self.phase, Phase::Idle) {
            self.surface.set_cursor(self.idle_cursor());
        }
    }

    fn idle_cursor(&self) -> Cursor {
        if self.drag_supported && self.overflowing {
            Cursor::Grab
        } else {
            Cursor::Default
        }
    }
}

impl<S: ScrollSurface> Drop for DragScroller<S> {
    fn drop(&mut self) {
        // Teardown mid-interaction must not leak listeners or leave native
        // snap disabled.
        match self.phase {
            Phase::Dragging(_) => {
                self.surface.release_drag_listeners();
                self.surface.set_selection_enabled(true);
                self.surface.set_snap_enabled(true);
            }
            Phase::Settling { .. } => {
                self.surface.set_snap_enabled(true);
            }
            Phase::Idle => {}
        }
    }
}

/// Child offset closest to `position`; ties go to the larger offset.
fn nearest_snap_offset(offsets: &[f64], position: f64) -> Option<f64> {
    let mut best: Option<f64> = None;
    for &offset in offsets {
        let replace = match best {
            None => true,
            Some(current) => {
                let candidate_distance = (offset - position).abs();
                let current_distance = (current - position).abs();
                candidate_distance < current_distance
                    || (candidate_distance == current_distance && offset > current)
            }
        };
        if replace {
            best = Some(offset);
        }
    }
    best
}
