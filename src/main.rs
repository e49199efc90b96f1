// SPDX-License-Identifier: GPL-3.0-only

//! Tracklet status watcher
//!
//! This is the panel-button view of the applet, minus the panel: it
//! connects to the Hamster daemon, refreshes on a periodic tick and on
//! daemon change signals, and prints the derived display state (button
//! label, fact rows, category summary) to the terminal.
//!
//! Everything runs on one current-thread runtime; a refresh is a fetch
//! followed by a pure aggregation pass, so no two passes ever overlap and
//! the most recent snapshot simply replaces the previous output.

use futures::StreamExt;
use std::time::Duration;
use tracklet::aggregate;
use tracklet::app_settings;
use tracklet::completion::ActivityIndex;
use tracklet::dbus::TrackerClient;
use tracklet::settings::{self, ViewSettings};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("tracklet=info".parse().unwrap()),
        )
        .init();

    let settings_path = settings::settings_file_path();
    let view_settings = ViewSettings::load(&settings_path).unwrap_or_else(|e| {
        tracing::warn!("{}, using defaults", e);
        ViewSettings::default()
    });

    let client = TrackerClient::connect_with_retries(5, 200).await?;
    let mut facts_changed = client.facts_changed().await?;
    let mut activities_changed = client.activities_changed().await?;

    let mut index = ActivityIndex::new(view_settings.dropdown_completion);
    refresh_completion(&client, &mut index).await;

    let mut tick =
        tokio::time::interval(Duration::from_secs(app_settings::REFRESH_INTERVAL_SECS));

    // The first interval tick fires immediately and doubles as the initial
    // refresh; afterwards the loop wakes every minute and on every daemon
    // notification, each time rebuilding the snapshot from a fresh fetch.
    loop {
        tokio::select! {
            _ = tick.tick() => {
                refresh_display(&client, &view_settings).await;
            }
            Some(_) = facts_changed.next() => {
                tracing::debug!("facts changed");
                refresh_display(&client, &view_settings).await;
            }
            Some(_) = activities_changed.next() => {
                tracing::debug!("activities changed");
                refresh_completion(&client, &mut index).await;
            }
        }
    }
}

/// Fetch today's facts, aggregate, and print the derived view.
async fn refresh_display(client: &TrackerClient, view_settings: &ViewSettings) {
    let facts = match client.todays_facts().await {
        Ok(facts) => facts,
        Err(e) => {
            tracing::warn!("fact refresh failed: {}", e);
            return;
        }
    };

    let snapshot = aggregate::aggregate(&facts);

    let mut label = snapshot.button_label();
    if view_settings.ellipsize_label {
        label = aggregate::ellipsize(&label, app_settings::MAX_LABEL_CHARS);
    }

    println!("{label}");
    for row in &snapshot.rows {
        println!("  {:<15} {:<24} {}", row.span, row.title, row.duration);
    }
    println!("  {}", snapshot.summary_text());
}

/// Rebuild the autocompletion index from the daemon's activity list.
async fn refresh_completion(client: &TrackerClient, index: &mut ActivityIndex) {
    match client.activities("").await {
        Ok(activities) => {
            index.rebuild(&activities);
            tracing::info!("completion index rebuilt, {} activities", index.len());
        }
        Err(e) => tracing::warn!("activity refresh failed: {}", e),
    }
}
