//! events — association of change-point dates with recorded events.
//!
//! Purpose
//! -------
//! Give a detected change point historical context by joining its date
//! against a caller-supplied event table within a day window.
//!
//! Key behaviors
//! -------------
//! - [`match_window`] returns every event within the inclusive window, in
//!   source order, with signed day offsets.
//! - [`find_nearest`] picks the closest event.
//! - [`associate_many`] / [`associate_with_config`] produce flat
//!   [`Association`] rows, using a sentinel row ([`NO_EVENT_LABEL`]) when a
//!   change point has no event nearby.
//!
//! Invariants & assumptions
//! ------------------------
//! - Event tables are loaded elsewhere; this module does no I/O.
//! - Matching never fails: absence of events is data, not an error.

pub mod matching;
pub mod types;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::matching::{associate_many, associate_with_config, find_nearest, match_window};
pub use self::types::{Association, Event, MatchedEvent, NO_EVENT_LABEL};
