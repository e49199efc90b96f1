// SPDX-License-Identifier: GPL-3.0-only

//! Centralized application settings and constants.

/// Application ID in RDNN (reverse domain name notation) format.
pub const APP_ID: &str = "io.github.tracklet.Tracklet";

/// Well-known bus name of the Hamster time-tracking daemon.
pub const HAMSTER_SERVICE: &str = "org.gnome.Hamster";

/// Object path of the Hamster daemon.
pub const HAMSTER_PATH: &str = "/org/gnome/Hamster";

/// Well-known bus name of the Hamster window server (overview/edit/preferences dialogs).
pub const WINDOW_SERVER_SERVICE: &str = "org.gnome.Hamster.WindowServer";

/// Object path of the Hamster window server.
pub const WINDOW_SERVER_PATH: &str = "/org/gnome/Hamster/WindowServer";

/// Seconds between periodic display refreshes.
pub const REFRESH_INTERVAL_SECS: u64 = 60;

/// Milliseconds between a popup focus-out and the scheduled hide.
pub const FOCUS_OUT_HIDE_DELAY_MS: u64 = 50;

/// Character budget for the button label when ellipsizing is enabled.
pub const MAX_LABEL_CHARS: usize = 24;

/// Button label shown while nothing is being tracked.
pub const IDLE_LABEL: &str = "inactive";

/// Summary text shown when today has no facts at all.
pub const EMPTY_SUMMARY: &str = "No activities yet.";
