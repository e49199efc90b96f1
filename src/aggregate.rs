// SPDX-License-Identifier: GPL-3.0-only

//! Display-state derivation over a day's facts.
//!
//! This is the one pure core of the applet: given today's fact list, in
//! chronological order as the daemon returns it, derive everything the view
//! shows — a display row per fact, per-category duration totals, and the
//! idle/running status that drives the button label.
//!
//! The transform performs no I/O, holds no state across calls, and never
//! fails: malformed fields (negative durations, truncated names) pass
//! through unvalidated and degrade the text rather than signaling an error.
//! Each refresh rebuilds a complete [`Snapshot`] from a fresh fetch; the
//! previous one is simply discarded.

use crate::app_settings;
use crate::fact::{hhmm, Fact};

/// Read-only projection of one fact, ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    /// Server-assigned fact identifier, for edit/resume actions.
    pub id: i32,
    /// `"HH:MM - HH:MM"`, or `"HH:MM - "` while the fact is running.
    pub span: String,
    /// Activity name.
    pub title: String,
    /// `"<H>h <M>min"`.
    pub duration: String,
    /// Every fact can be edited.
    pub editable: bool,
    /// A finished fact can be resumed (re-added as a new running fact).
    pub resumable: bool,
}

/// Accumulated seconds per category, presented in first-seen order.
///
/// Category names match case-sensitively and exactly. Today's lists hold a
/// handful of categories, so lookups are a linear scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryTotals {
    entries: Vec<(String, i64)>,
}

impl CategoryTotals {
    fn add(&mut self, category: &str, seconds: i64) {
        match self.entries.iter_mut().find(|(name, _)| name == category) {
            Some((_, total)) => *total += seconds,
            None => self.entries.push((category.to_owned(), seconds)),
        }
    }

    /// Accumulated seconds for one category, if it appeared today.
    pub fn get(&self, category: &str) -> Option<i64> {
        self.entries
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, total)| *total)
    }

    /// Entries in the order their categories first appeared.
    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.entries.iter().map(|(name, total)| (name.as_str(), *total))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum over all categories; equals the sum of all input facts' seconds.
    pub fn total_seconds(&self) -> i64 {
        self.entries.iter().map(|(_, total)| total).sum()
    }
}

/// Derived tracking status after the last fact of the day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// No facts today, or the last one has ended.
    Idle,
    /// The last fact has no end time yet.
    Running {
        /// Activity name of the running fact.
        name: String,
        /// Tracked seconds so far, server-supplied.
        elapsed_seconds: i64,
    },
}

impl Status {
    pub fn is_running(&self) -> bool {
        matches!(self, Status::Running { .. })
    }
}

/// Complete derived display state for one refresh cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// One row per input fact, input order preserved.
    pub rows: Vec<DisplayRow>,
    /// Per-category duration totals.
    pub totals: CategoryTotals,
    /// Idle, or currently-tracking-X-for-duration-Y.
    pub status: Status,
}

impl Snapshot {
    /// Text for the popup summary line.
    ///
    /// With no facts at all this is a fixed placeholder; otherwise the
    /// category totals in encounter order, each as `"<category>: <H>.<tenths>"`
    /// with the fraction truncated to one decimal hour.
    pub fn summary_text(&self) -> String {
        if self.totals.is_empty() {
            return app_settings::EMPTY_SUMMARY.to_owned();
        }
        self.totals
            .iter()
            .map(|(category, seconds)| format_decimal_hours(category, seconds))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Text for the panel button.
    ///
    /// `"<name> <H>:<MM>"` while tracking, a fixed idle label otherwise.
    pub fn button_label(&self) -> String {
        match &self.status {
            Status::Running {
                name,
                elapsed_seconds,
            } => format!(
                "{} {}:{:02}",
                name,
                elapsed_seconds / 3600,
                (elapsed_seconds / 60) % 60
            ),
            Status::Idle => app_settings::IDLE_LABEL.to_owned(),
        }
    }
}

/// Derive the display snapshot for today's facts.
///
/// `facts` is today's list in chronological (start-time) order, possibly
/// empty. The sequence is traversed exactly once. Pure: calling this twice
/// on the same input yields identical output.
pub fn aggregate<'a, I>(facts: I) -> Snapshot
where
    I: IntoIterator<Item = &'a Fact>,
{
    let mut rows = Vec::new();
    let mut totals = CategoryTotals::default();
    // Only the last fact decides the status.
    let mut last: Option<(bool, String, i64)> = None;

    for fact in facts {
        rows.push(DisplayRow {
            id: fact.id,
            span: format_span(fact),
            title: fact.name.clone(),
            duration: format_duration(fact.seconds),
            editable: true,
            resumable: !fact.is_running(),
        });
        totals.add(&fact.category, fact.seconds);
        last = Some((fact.is_running(), fact.name.clone(), fact.seconds));
    }

    let status = match last {
        Some((true, name, seconds)) => Status::Running {
            name,
            elapsed_seconds: seconds,
        },
        _ => Status::Idle,
    };

    Snapshot {
        rows,
        totals,
        status,
    }
}

/// `"HH:MM - HH:MM"`, with the end left blank while the fact is running.
fn format_span(fact: &Fact) -> String {
    match fact.end {
        Some(end) => format!("{} - {}", hhmm(fact.start), hhmm(end)),
        None => format!("{} - ", hhmm(fact.start)),
    }
}

/// `"<H>h <M>min"` from a seconds count.
pub fn format_duration(seconds: i64) -> String {
    format!("{}h {}min", seconds / 3600, (seconds / 60) % 60)
}

/// One summary fragment: hours truncated to a single decimal via integer
/// arithmetic on the sub-hour remainder.
fn format_decimal_hours(category: &str, seconds: i64) -> String {
    format!(
        "{}: {}.{}",
        category,
        seconds / 3600,
        (10 * (seconds % 3600)) / 3600
    )
}

/// Truncate a label to `max_chars` characters, marking the cut with `…`.
///
/// Applied to the button label only when the ellipsize setting is on.
pub fn ellipsize(label: &str, max_chars: usize) -> String {
    if label.chars().count() <= max_chars {
        return label.to_owned();
    }
    let mut out: String = label.chars().take(max_chars.saturating_sub(1)).collect();
    out.push('…');
    out
}
