//! Local activity marker metadata.
//!
//! Other Cadence clients record local activity results as markers whose
//! headers are written with their stock JSON converter. These types mirror
//! that layout. [`LocalActivityMarkerHeader`] is routed to the fallback
//! converter by default; [`MarkerHeader`] is not.

use serde::{Deserialize, Serialize};

/// Header of a local activity marker
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalActivityMarkerHeader {
    pub activity_id: String,
    pub activity_type: String,
    /// Workflow time at which the result was recorded
    pub replay_time_millis: i64,
    pub attempt: i32,
    /// Delay before the next attempt, when the activity is being retried
    pub backoff_millis: Option<i64>,
    pub err_reason: Option<String>,
    pub is_cancelled: bool,
}

impl LocalActivityMarkerHeader {
    pub fn new(activity_id: impl Into<String>, activity_type: impl Into<String>) -> Self {
        Self {
            activity_id: activity_id.into(),
            activity_type: activity_type.into(),
            ..Default::default()
        }
    }

    pub fn is_failure(&self) -> bool {
        self.err_reason.is_some()
    }
}

/// Header shared by all markers recorded by the replay handler
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerHeader {
    pub id: String,
    pub event_id: i64,
    pub access_count: i32,
}

impl MarkerHeader {
    pub fn new(id: impl Into<String>, event_id: i64, access_count: i32) -> Self {
        Self {
            id: id.into(),
            event_id,
            access_count,
        }
    }
}
