// SPDX-License-Identifier: GPL-3.0-only

//! Tracklet - A panel companion for the Hamster time tracker
//!
//! This crate provides the display-state logic of a time-tracking panel
//! applet, plus two binaries wired to the Hamster daemon over the session
//! bus.
//!
//! # Architecture
//!
//! The applet is a thin presentation layer over a remote daemon: it pulls
//! today's facts, derives everything worth showing in one pure pass, and
//! forwards user actions back over the bus. The daemon owns all tracking
//! state; each refresh here discards the previous snapshot and rebuilds
//! from a fresh fetch, triggered by a periodic tick or a daemon change
//! signal.
//!
//! Two binaries ship with the library:
//!
//! 1. **Status watcher** (`tracklet`): the panel-button view without the
//!    panel — prints the derived label, rows and summary on every refresh.
//!
//! 2. **Command sender** (`tracklet-ctl`): one-shot start/stop/dialog
//!    commands.
//!
//! # Modules
//!
//! - `aggregate`: the fact aggregator — rows, category totals, status
//! - `app_settings`: centralized application constants
//! - `completion`: casefolded activity autocompletion index
//! - `dbus`: proxies and client wrapper for the Hamster daemon
//! - `fact`: fact/activity records and their wire forms
//! - `popup`: popup visibility bookkeeping, detached from widgets
//! - `settings`: persisted presentation options

pub mod aggregate;
pub mod app_settings;
pub mod completion;
pub mod dbus;
pub mod fact;
pub mod popup;
pub mod settings;

// ============================================================================
// Integration Tests
// ============================================================================
