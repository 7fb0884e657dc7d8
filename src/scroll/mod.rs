//! Drag-to-scroll behavior for the hourly forecast strip
//!
//! The strip is a horizontally overflowing, snap-aligned row of forecast
//! cards. This module owns the interaction logic: click/touch-drag to scroll,
//! release to settle on the nearest card. The embedding shell supplies the
//! actual scrollable container behind the [`ScrollSurface`] trait; everything
//! here is toolkit-agnostic and synchronous.
//!
//! Engine-specific behavior is a capability question answered up front by
//! [`Engine::supports_drag_snap`], not a conditional buried in the
//! interaction code. Overflow awareness is a constructor-time strategy: the
//! historical behavior assumed the strip always overflowed, the current one
//! re-measures whenever the surface reports a content resize.

mod scroller;
mod surface;

pub use scroller::DragScroller;
pub use surface::{Cursor, Engine, OverflowDetection, ScrollPoint, ScrollSurface};
