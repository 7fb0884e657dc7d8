//! `ppg-report` - Weather reporting core for paramotor pilots
//!
//! This library provides the data plumbing behind the report view: coarse
//! geographic gating for forecast sources, a persistent TTL cache over the
//! provider HTTP calls, elevation and timezone resolution for a selected
//! site, and the drag-to-scroll interaction used by the forecast strip.

pub mod api;
pub mod cache;
pub mod config;
pub mod elevation;
pub mod error;
pub mod geo;
pub mod http;
pub mod scroll;
pub mod site;
pub mod timezone;
pub mod web;

// Re-export core types for public API
pub use cache::PersistentCache;
pub use config::PpgReportConfig;
pub use elevation::{ELEVATION_NO_DATA, ElevationResolver};
pub use error::{PpgReportError, Result};
pub use geo::{Coordinates, is_possibly_within_usa, is_within_rap_model_coverage};
pub use http::{CachedHttpClient, HttpTransport, RESPONSE_TTL, ReqwestTransport};
pub use scroll::{Cursor, DragScroller, Engine, OverflowDetection, ScrollPoint, ScrollSurface};
pub use site::{SiteDetails, SiteResolver};
pub use timezone::TimezoneResolver;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
