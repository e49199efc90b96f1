// SPDX-License-Identifier: GPL-3.0-only

//! D-Bus client layer for the Hamster time-tracking daemon.
//!
//! Two remote services are consumed, both on the session bus:
//!
//! - **Tracker** (`org.gnome.Hamster` at `/org/gnome/Hamster`): supplies
//!   today's facts and the activity list, accepts add-fact and
//!   stop-tracking commands, and emits `FactsChanged` /
//!   `ActivitiesChanged` when its data moves under us.
//! - **Window server** (`org.gnome.Hamster.WindowServer` at
//!   `/org/gnome/Hamster/WindowServer`): owns the overview, edit and
//!   preferences dialogs; we only ask it to open them.
//!
//! [`TrackerClient`] wraps both proxies and translates wire tuples into the
//! domain types in [`crate::fact`]. All calls are plain request/response;
//! nothing here caches or retries beyond the initial connection.

use crate::app_settings;
use crate::fact::{Activity, Fact, WireFact};
use chrono::Local;
use zbus::zvariant::Value;

/// Proxy for the Hamster daemon itself.
#[zbus::proxy(
    interface = "org.gnome.Hamster",
    default_service = "org.gnome.Hamster",
    default_path = "/org/gnome/Hamster",
    gen_blocking = false
)]
pub trait Hamster {
    /// Today's facts, in chronological start-time order.
    async fn get_todays_facts(&self) -> zbus::Result<Vec<WireFact>>;

    /// Known activities matching a search string ("" for all).
    async fn get_activities(&self, search: &str) -> zbus::Result<Vec<Activity>>;

    /// Start tracking from a free-text `"name@category"` fact string.
    /// Zero start/end defer to the daemon's clock; `temporary` is unused
    /// by this applet and always false.
    async fn add_fact(
        &self,
        fact: &str,
        start_time: i32,
        end_time: i32,
        temporary: bool,
    ) -> zbus::Result<i32>;

    /// Stop the running fact at the given local-wall-clock epoch, boxed in
    /// a variant as the daemon expects.
    async fn stop_tracking(&self, end_time: Value<'_>) -> zbus::Result<()>;

    /// Emitted whenever the fact store changes.
    #[zbus(signal)]
    fn facts_changed(&self) -> zbus::Result<()>;

    /// Emitted whenever the activity list changes.
    #[zbus(signal)]
    fn activities_changed(&self) -> zbus::Result<()>;
}

/// Proxy for the Hamster window server (dialog launcher).
#[zbus::proxy(
    interface = "org.gnome.Hamster.WindowServer",
    default_service = "org.gnome.Hamster.WindowServer",
    default_path = "/org/gnome/Hamster/WindowServer",
    gen_blocking = false
)]
pub trait WindowServer {
    /// Open the overview window.
    #[zbus(name = "overview")]
    async fn overview(&self) -> zbus::Result<()>;

    /// Open the edit dialog for one fact.
    #[zbus(name = "edit")]
    async fn edit(&self, fact_id: Value<'_>) -> zbus::Result<()>;

    /// Open the tracking preferences dialog.
    #[zbus(name = "preferences")]
    async fn preferences(&self) -> zbus::Result<()>;
}

/// Result type for D-Bus operations.
pub type DbusResult<T> = Result<T, DbusError>;

/// Errors that can occur during D-Bus operations.
#[derive(Debug, Clone)]
pub enum DbusError {
    /// Failed to connect to the session bus or build a proxy.
    ConnectionFailed(String),
    /// Failed to call a method.
    MethodCallFailed(String),
}

impl std::fmt::Display for DbusError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DbusError::ConnectionFailed(msg) => write!(f, "D-Bus connection failed: {}", msg),
            DbusError::MethodCallFailed(msg) => write!(f, "D-Bus method call failed: {}", msg),
        }
    }
}

impl std::error::Error for DbusError {}

/// Client handle over both Hamster services.
pub struct TrackerClient {
    /// Proxy to the tracking daemon.
    hamster: HamsterProxy<'static>,
    /// Proxy to the dialog launcher.
    windows: WindowServerProxy<'static>,
}

impl std::fmt::Debug for TrackerClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrackerClient").finish_non_exhaustive()
    }
}

impl TrackerClient {
    /// Connect to the session bus and build proxies for both services.
    pub async fn connect() -> DbusResult<Self> {
        let connection = zbus::Connection::session()
            .await
            .map_err(|e| DbusError::ConnectionFailed(e.to_string()))?;

        let hamster = HamsterProxy::new(&connection)
            .await
            .map_err(|e| DbusError::ConnectionFailed(e.to_string()))?;
        let windows = WindowServerProxy::new(&connection)
            .await
            .map_err(|e| DbusError::ConnectionFailed(e.to_string()))?;

        tracing::info!(
            "connected to {} and {}",
            app_settings::HAMSTER_SERVICE,
            app_settings::WINDOW_SERVER_SERVICE
        );
        Ok(Self { hamster, windows })
    }

    /// Connect with retries and exponential backoff, for startup races
    /// against the daemon.
    ///
    /// # Arguments
    /// * `max_retries` - Maximum number of connection attempts.
    /// * `initial_delay_ms` - Initial delay between retries in milliseconds.
    pub async fn connect_with_retries(
        max_retries: u32,
        initial_delay_ms: u64,
    ) -> DbusResult<Self> {
        let mut attempts = 0;
        let mut delay = initial_delay_ms;

        loop {
            match Self::connect().await {
                Ok(client) => return Ok(client),
                Err(e) => {
                    attempts += 1;
                    if attempts >= max_retries {
                        return Err(e);
                    }
                    tracing::warn!(
                        "connection attempt {} failed, retrying in {}ms: {}",
                        attempts,
                        delay,
                        e
                    );
                    tokio::time::sleep(tokio::time::Duration::from_millis(delay)).await;
                    delay *= 2;
                }
            }
        }
    }

    /// Fetch today's facts as domain records.
    pub async fn todays_facts(&self) -> DbusResult<Vec<Fact>> {
        let wire = self
            .hamster
            .get_todays_facts()
            .await
            .map_err(|e| DbusError::MethodCallFailed(e.to_string()))?;
        Ok(wire.into_iter().map(Fact::from).collect())
    }

    /// Fetch the activity list for autocompletion ("" matches all).
    pub async fn activities(&self, search: &str) -> DbusResult<Vec<Activity>> {
        self.hamster
            .get_activities(search)
            .await
            .map_err(|e| DbusError::MethodCallFailed(e.to_string()))
    }

    /// Start tracking from a `"name@category"` string; returns the new
    /// fact's id.
    pub async fn add_fact(&self, fact: &str) -> DbusResult<i32> {
        let id = self
            .hamster
            .add_fact(fact, 0, 0, false)
            .await
            .map_err(|e| DbusError::MethodCallFailed(e.to_string()))?;
        tracing::debug!("activated: {}[{}]", fact, id);
        Ok(id)
    }

    /// Resume a finished fact by re-adding it as a new running one.
    /// The caller is expected to check the row's resumable flag first.
    pub async fn resume(&self, fact: &Fact) -> DbusResult<i32> {
        tracing::debug!("resume {}", fact.fact_label());
        self.add_fact(&fact.fact_label()).await
    }

    /// Stop the currently running fact as of now.
    pub async fn stop_tracking_now(&self) -> DbusResult<()> {
        let now = local_stop_timestamp();
        self.hamster
            .stop_tracking(Value::from(now))
            .await
            .map_err(|e| DbusError::MethodCallFailed(e.to_string()))
    }

    /// Open the overview window.
    pub async fn overview(&self) -> DbusResult<()> {
        self.windows
            .overview()
            .await
            .map_err(|e| DbusError::MethodCallFailed(e.to_string()))
    }

    /// Open the edit dialog for one fact.
    pub async fn edit_fact(&self, id: i32) -> DbusResult<()> {
        self.windows
            .edit(Value::from(id))
            .await
            .map_err(|e| DbusError::MethodCallFailed(e.to_string()))
    }

    /// Open the edit dialog with no preselected fact ("add earlier
    /// activity"). The window server accepts the call without arguments.
    pub async fn add_earlier(&self) -> DbusResult<()> {
        self.windows
            .inner()
            .call::<_, _, ()>("edit", &())
            .await
            .map_err(|e| DbusError::MethodCallFailed(e.to_string()))
    }

    /// Open the tracking preferences dialog.
    pub async fn preferences(&self) -> DbusResult<()> {
        self.windows
            .preferences()
            .await
            .map_err(|e| DbusError::MethodCallFailed(e.to_string()))
    }

    /// Stream of fact-store change notifications.
    pub async fn facts_changed(&self) -> DbusResult<FactsChangedStream> {
        self.hamster
            .receive_facts_changed()
            .await
            .map_err(|e| DbusError::ConnectionFailed(e.to_string()))
    }

    /// Stream of activity-list change notifications.
    pub async fn activities_changed(&self) -> DbusResult<ActivitiesChangedStream> {
        self.hamster
            .receive_activities_changed()
            .await
            .map_err(|e| DbusError::ConnectionFailed(e.to_string()))
    }
}

/// The stop timestamp the daemon expects: the current wall-clock time
/// re-expressed as an epoch, i.e. UTC shifted by the active offset
/// (including DST).
fn local_stop_timestamp() -> i32 {
    Local::now().naive_local().and_utc().timestamp() as i32
}
