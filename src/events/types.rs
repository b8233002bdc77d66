//! events::types — event records and association rows.
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Label of the placeholder association emitted when no event matches.
pub const NO_EVENT_LABEL: &str = "No major recorded event";

/// A recorded geopolitical or economic event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub date: NaiveDate,
    pub label: String,
    #[serde(default)]
    pub description: String,
}

impl Event {
    pub fn new(date: NaiveDate, label: impl Into<String>, description: impl Into<String>) -> Self {
        Event { date, label: label.into(), description: description.into() }
    }
}

/// An event inside the window of a change point, borrowed from the caller's
/// table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchedEvent<'a> {
    pub event: &'a Event,
    /// `event.date − change_point` in calendar days; negative means the
    /// event preceded the change.
    pub days_from_change: i64,
}

/// One output row linking a change point to an event, or to nothing.
///
/// Sentinel rows carry [`NO_EVENT_LABEL`] and no date, description, or day
/// offset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Association {
    pub change_point_date: NaiveDate,
    pub event_date: Option<NaiveDate>,
    pub event: String,
    pub description: Option<String>,
    pub days_from_change: Option<i64>,
}

impl Association {
    pub(crate) fn matched(change_point_date: NaiveDate, m: &MatchedEvent<'_>) -> Self {
        Association {
            change_point_date,
            event_date: Some(m.event.date),
            event: m.event.label.clone(),
            description: Some(m.event.description.clone()),
            days_from_change: Some(m.days_from_change),
        }
    }

    pub(crate) fn sentinel(change_point_date: NaiveDate) -> Self {
        Association {
            change_point_date,
            event_date: None,
            event: NO_EVENT_LABEL.to_string(),
            description: None,
            days_from_change: None,
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.event_date.is_none()
    }
}
