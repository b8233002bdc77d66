//! events::matching — windowed join of change points against an event table.
//!
//! Purpose
//! -------
//! Relate a detected change-point date to recorded events that happened
//! around it.
//!
//! Key behaviors
//! -------------
//! - The window is inclusive: an event exactly `window_days` away matches.
//! - Matches keep the caller's table order.
//! - Nearest-event resolution minimises `|days_from_change|`; ties go to the
//!   earlier event date, then to source order.
//! - Batch association never drops a change point: one with no match yields
//!   a single sentinel row.
//!
//! Invariants & assumptions
//! ------------------------
//! - The event table is read-only and may be unsorted.
//! - Day offsets are whole calendar days (`NaiveDate` difference).
use chrono::NaiveDate;

use crate::{
    config::EventMatchingConfig,
    events::types::{Association, Event, MatchedEvent},
};

/// All events within `window_days` of `change_point`, in source order.
pub fn match_window<'a>(
    change_point: NaiveDate, events: &'a [Event], window_days: u32,
) -> Vec<MatchedEvent<'a>> {
    let window = i64::from(window_days);
    events
        .iter()
        .filter_map(|event| {
            let days_from_change = (event.date - change_point).num_days();
            (days_from_change.abs() <= window).then_some(MatchedEvent { event, days_from_change })
        })
        .collect()
}

/// The matched event closest to `change_point`, or `None` when the window is
/// empty.
pub fn find_nearest<'a>(
    change_point: NaiveDate, events: &'a [Event], window_days: u32,
) -> Option<MatchedEvent<'a>> {
    match_window(change_point, events, window_days)
        .into_iter()
        .min_by_key(|m| (m.days_from_change.abs(), m.event.date))
}

/// One association per matched event for every change point, or exactly one
/// sentinel association for a change point with no match.
///
/// Examples
/// --------
/// ```rust
/// # use brent_changepoint::events::{Event, associate_many, NO_EVENT_LABEL};
/// # use chrono::NaiveDate;
/// let cp = NaiveDate::from_ymd_opt(2020, 3, 9).unwrap();
/// let events = vec![Event::new(
///     NaiveDate::from_ymd_opt(2019, 1, 1).unwrap(), "Old news", "",
/// )];
/// let rows = associate_many(&[cp], &events, 30);
/// assert_eq!(rows.len(), 1);
/// assert_eq!(rows[0].event, NO_EVENT_LABEL);
/// ```
pub fn associate_many(change_points: &[NaiveDate], events: &[Event], window_days: u32) -> Vec<Association> {
    let mut out = Vec::new();
    for &cp in change_points {
        let matches = match_window(cp, events, window_days);
        if matches.is_empty() {
            out.push(Association::sentinel(cp));
        } else {
            out.extend(matches.iter().map(|m| Association::matched(cp, m)));
        }
    }
    out
}

/// Associate using an [`EventMatchingConfig`]: every match, or only the
/// nearest one per change point when `match_nearest` is set.
pub fn associate_with_config(
    change_points: &[NaiveDate], events: &[Event], config: &EventMatchingConfig,
) -> Vec<Association> {
    if !config.match_nearest() {
        return associate_many(change_points, events, config.window_days());
    }
    change_points
        .iter()
        .map(|&cp| match find_nearest(cp, events, config.window_days()) {
            Some(m) => Association::matched(cp, &m),
            None => Association::sentinel(cp),
        })
        .collect()
}
