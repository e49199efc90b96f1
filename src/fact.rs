// SPDX-License-Identifier: GPL-3.0-only

//! Fact and activity records as the Hamster daemon reports them.
//!
//! A *fact* is one recorded interval of activity tracking (name, category,
//! start/end time). An *activity* is a (name, category) pair usable for
//! autocompletion, independent of any specific tracked interval.
//!
//! The daemon sends timestamps already zone-adjusted; this layer formats
//! them as supplied and never validates field contents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use zbus::zvariant::Type;

/// End-time value the daemon uses for a fact that is still running.
const RUNNING_SENTINEL: i64 = 0;

/// One tracked interval of activity.
///
/// At most one fact in a day's list may be running (`end == None`), and
/// when present it is the chronologically last record. The invariant is
/// the daemon's to uphold; nothing here enforces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fact {
    /// Server-assigned identifier.
    pub id: i32,
    /// Activity name.
    pub name: String,
    /// Category name.
    pub category: String,
    /// Start of the interval, epoch seconds.
    pub start: i64,
    /// End of the interval, `None` while the fact is still running.
    pub end: Option<i64>,
    /// Tracked seconds, server-supplied (elapsed-so-far for a running fact).
    pub seconds: i64,
}

impl Fact {
    /// Whether this fact has no recorded end time yet.
    pub fn is_running(&self) -> bool {
        self.end.is_none()
    }

    /// The free-text `"name@category"` form the daemon's AddFact consumes.
    pub fn fact_label(&self) -> String {
        compose_fact_label(&self.name, &self.category)
    }
}

/// A fact as it crosses the bus: a flat struct with `0` as the
/// still-running end sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Type, Serialize, Deserialize)]
pub struct WireFact {
    pub id: i32,
    pub name: String,
    pub category: String,
    pub start: i64,
    pub end: i64,
    pub seconds: i64,
}

impl From<WireFact> for Fact {
    fn from(wire: WireFact) -> Self {
        Self {
            id: wire.id,
            name: wire.name,
            category: wire.category,
            start: wire.start,
            end: (wire.end != RUNNING_SENTINEL).then_some(wire.end),
            seconds: wire.seconds,
        }
    }
}

/// A (name, category) pair usable for autocompletion.
#[derive(Debug, Clone, PartialEq, Eq, Type, Serialize, Deserialize)]
pub struct Activity {
    pub name: String,
    pub category: String,
}

impl Activity {
    /// The free-text `"name@category"` form the daemon's AddFact consumes.
    pub fn fact_label(&self) -> String {
        compose_fact_label(&self.name, &self.category)
    }
}

/// Compose the daemon's `"name@category"` fact string. A missing category
/// yields the bare name.
pub fn compose_fact_label(name: &str, category: &str) -> String {
    if category.is_empty() {
        name.to_owned()
    } else {
        format!("{name}@{category}")
    }
}

/// Format an epoch-seconds timestamp as `HH:MM`.
///
/// An out-of-range timestamp degrades to an empty string; this layer does
/// not sanitize daemon data.
pub fn hhmm(epoch: i64) -> String {
    DateTime::<Utc>::from_timestamp(epoch, 0)
        .map(|t| t.format("%H:%M").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test: the wire end sentinel maps to a running fact.
    #[test]
    fn test_wire_running_sentinel() {
        let wire = WireFact {
            id: 7,
            name: "Coding".to_string(),
            category: "Work".to_string(),
            start: 34_200,
            end: 0,
            seconds: 600,
        };
        let fact = Fact::from(wire);
        assert!(fact.is_running(), "end == 0 should mean still running");
        assert_eq!(fact.end, None);
    }

    /// Test: a nonzero wire end time is carried over.
    #[test]
    fn test_wire_finished_fact() {
        let wire = WireFact {
            id: 3,
            name: "Email".to_string(),
            category: "Work".to_string(),
            start: 32_400,
            end: 34_200,
            seconds: 1_800,
        };
        let fact = Fact::from(wire);
        assert!(!fact.is_running());
        assert_eq!(fact.end, Some(34_200));
    }

    /// Test: fact label composition matches the daemon's free-text form.
    #[test]
    fn test_fact_label_composition() {
        assert_eq!(compose_fact_label("Email", "Work"), "Email@Work");
        assert_eq!(
            compose_fact_label("Email", ""),
            "Email",
            "missing category should yield the bare name"
        );

        let activity = Activity {
            name: "Coding".to_string(),
            category: "Work".to_string(),
        };
        assert_eq!(activity.fact_label(), "Coding@Work");
    }

    /// Test: epoch formatting is HH:MM with zero padding.
    #[test]
    fn test_hhmm_formatting() {
        // 1970-01-01 09:00 and 09:30
        assert_eq!(hhmm(9 * 3600), "09:00");
        assert_eq!(hhmm(9 * 3600 + 30 * 60), "09:30");
        assert_eq!(hhmm(0), "00:00");
    }

    /// Test: an unrepresentable timestamp degrades to empty output.
    #[test]
    fn test_hhmm_out_of_range() {
        assert_eq!(hhmm(i64::MAX), "");
    }
}
