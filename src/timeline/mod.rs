//! Timeline pin export.
//!
//! Cards assigned to the member with a due date close enough to today are
//! turned into pins and handed to a `PinSink`. Delivery is fire-and-forget:
//! a rejected pin is logged and the export moves on.

mod sink;

pub use sink::{HttpPinSink, LogPinSink, TimelineSink};

use crate::trello::{Card, FetchError};
use chrono::{DateTime, Duration, Months, Utc};
use serde::Serialize;

/// Days in the past a due date may lie and still be pinned.
///
pub const DAYS_BEFORE: i64 = 2;

/// Months in the future a due date may lie and still be pinned.
///
pub const MONTHS_AFTER: u32 = 12;

/// Layout of a pin as shown on the timeline.
///
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PinLayout {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub subtitle: String,
    pub body: String,
    pub tiny_icon: String,
}

/// A timeline pin keyed by the card id.
///
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Pin {
    pub id: String,
    pub time: String,
    pub layout: PinLayout,
}

/// Accepts pins for delivery to a timeline.
///
#[allow(async_fn_in_trait)]
pub trait PinSink {
    async fn insert_pin(&self, pin: &Pin) -> Result<(), FetchError>;
}

/// Result of one export run.
///
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExportSummary {
    pub evaluated: usize,
    pub pinned: usize,
}

impl ExportSummary {
    /// Returns the text shown to the user once the export is done.
    ///
    pub fn message(&self) -> String {
        if self.evaluated == 0 {
            "No assigned card was found, so no pins have been sent to the timeline.".to_string()
        } else if self.pinned > 0 {
            format!(
                "{} cards have been evaluated, and {} pins have been sent to the timeline.",
                self.evaluated, self.pinned
            )
        } else {
            format!(
                "{} cards have been evaluated, but none has a valid due date. No pins have been sent to the timeline.",
                self.evaluated
            )
        }
    }
}

/// Returns true if the due date falls inside the pin window around `now`.
///
/// The window is compared by calendar day (UTC) and includes both ends: from
/// two days before today up to the same day one year ahead.
///
pub fn within_window(due: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    let today = now.date_naive();
    let first = today - Duration::days(DAYS_BEFORE);
    let last = today
        .checked_add_months(Months::new(MONTHS_AFTER))
        .unwrap_or(today);
    let day = due.date_naive();
    day >= first && day <= last
}

/// Build the pin for a card due at `due`.
///
pub fn pin_for(card: &Card, due: DateTime<Utc>) -> Pin {
    Pin {
        id: card.id.clone(),
        time: due.to_rfc3339(),
        layout: PinLayout {
            kind: "genericPin".to_string(),
            title: card.name.clone(),
            subtitle: "Trello reminder".to_string(),
            body: card.desc.clone().unwrap_or_default(),
            tiny_icon: "system://images/SCHEDULED_EVENT".to_string(),
        },
    }
}
