//! The single I/O boundary of the reconciliation core. Every user action
//! becomes a bridge command whose successful response replaces the
//! canonical snapshot; transport failures are logged and otherwise
//! ignored, leaving the view in its last-known-good state.

use anyhow::{Context, Result};
use azkar_core::units::Unit;
use azkar_core::view::ViewState;
use azkar_shared::{AppData, RemoveZekrArgs, SetAutostartArgs, SetIntervalArgs};
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::bridge::CommandBridge;

pub struct SyncClient<B: CommandBridge> {
    bridge: B,
    view: ViewState,
    events: Option<mpsc::UnboundedReceiver<()>>,
    closed: bool,
}

impl<B: CommandBridge> SyncClient<B> {
    /// Subscribes to change notifications, then fetches the canonical
    /// state and the autostart flag once each.
    pub async fn start(bridge: B) -> Result<Self> {
        let events = bridge.subscribe_data_updated();
        let data = bridge
            .get_data()
            .await
            .context("initial get_data failed")?;
        let autostart = bridge
            .get_autostart()
            .await
            .context("initial get_autostart failed")?;

        info!(
            items = data.azkar.len(),
            interval_seconds = data.interval_seconds,
            autostart,
            "sync client started"
        );

        Ok(Self {
            bridge,
            view: ViewState::new(data, autostart),
            events: Some(events),
            closed: false,
        })
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Applies a command response or refetch payload as the new canonical
    /// snapshot. After shutdown this is a no-op: in-flight requests are
    /// never cancelled, so late responses must land harmlessly.
    pub fn apply_snapshot(&mut self, data: AppData) -> bool {
        if self.closed {
            debug!("snapshot arrived after shutdown; dropping");
            return false;
        }
        self.view.apply_snapshot(data);
        true
    }

    /// Keystroke in the interval field. Stores the text verbatim; when it
    /// denotes at least one whole second, submits it to the store.
    pub async fn interval_input(&mut self, raw: &str) {
        let Some(seconds) = self.view.interval.edit(raw) else {
            return;
        };
        match self.bridge.set_interval(SetIntervalArgs { seconds }).await {
            Ok(data) => {
                self.apply_snapshot(data);
            }
            Err(err) => error!(error = %err, seconds, "set_interval command failed"),
        }
    }

    /// Unit selector change. Display-only; no command is issued until the
    /// user edits the number again.
    pub fn change_interval_unit(&mut self, unit: Unit) {
        let canonical_seconds = self.view.data.interval_seconds;
        self.view.interval.change_unit(unit, canonical_seconds);
    }

    pub fn new_zekr_input(&mut self, text: &str) {
        self.view.list.set_new_text(text);
    }

    /// Submits the new-item input. Whitespace-only input is a silent
    /// no-op; on failure the input box keeps its text.
    pub async fn add_zekr(&mut self) {
        let Some(args) = self.view.list.add_request() else {
            return;
        };
        match self.bridge.add_zekr(args).await {
            Ok(data) => {
                if self.apply_snapshot(data) {
                    self.view.list.add_confirmed();
                }
            }
            Err(err) => error!(error = %err, "add_zekr command failed"),
        }
    }

    pub fn begin_edit(&mut self, id: &str) {
        let zekr = self.view.data.azkar.iter().find(|zekr| zekr.id == id).cloned();
        if let Some(zekr) = zekr {
            self.view.list.begin_edit(&zekr);
        }
    }

    pub fn edit_draft(&mut self, draft: &str) {
        self.view.list.edit_draft(draft);
    }

    pub fn cancel_edit(&mut self) {
        self.view.list.cancel_edit();
    }

    /// Commits the open edit session. An empty draft is a silent no-op;
    /// on failure the session stays open with the draft intact.
    pub async fn save_edit(&mut self) {
        let Some(args) = self.view.list.save_request() else {
            return;
        };
        match self.bridge.update_zekr(args).await {
            Ok(data) => {
                if self.apply_snapshot(data) {
                    self.view.list.save_confirmed();
                }
            }
            Err(err) => error!(error = %err, "update_zekr command failed"),
        }
    }

    /// Removes an item immediately, independent of any edit session. A
    /// session pointing at the removed id is cleared by reconciliation.
    pub async fn remove_zekr(&mut self, id: &str) {
        let args = RemoveZekrArgs { id: id.to_string() };
        match self.bridge.remove_zekr(args).await {
            Ok(data) => {
                self.apply_snapshot(data);
            }
            Err(err) => error!(error = %err, id, "remove_zekr command failed"),
        }
    }

    pub async fn toggle_pause(&mut self) {
        match self.bridge.toggle_pause().await {
            Ok(data) => {
                self.apply_snapshot(data);
            }
            Err(err) => error!(error = %err, "toggle_pause command failed"),
        }
    }

    pub async fn set_autostart(&mut self, enable: bool) {
        match self.bridge.set_autostart(SetAutostartArgs { enable }).await {
            Ok(()) => {
                if !self.closed {
                    self.view.autostart = enable;
                }
            }
            Err(err) => error!(error = %err, enable, "set_autostart command failed"),
        }
    }

    /// Full refetch; used at startup and per change notification. There
    /// is no incremental path.
    pub async fn refresh(&mut self) {
        match self.bridge.get_data().await {
            Ok(data) => {
                self.apply_snapshot(data);
            }
            Err(err) => error!(error = %err, "get_data refresh failed"),
        }
    }

    /// Drains queued change notifications, refetching once per signal.
    pub async fn process_pending_events(&mut self) {
        loop {
            let signalled = match self.events.as_mut() {
                Some(events) => events.try_recv().is_ok(),
                None => false,
            };
            if !signalled {
                return;
            }
            debug!("data-updated signal received; refetching");
            self.refresh().await;
        }
    }

    /// Releases the notification subscription. In-flight commands are not
    /// cancelled; their responses are dropped by the closed guard in
    /// [`Self::apply_snapshot`].
    pub fn shutdown(&mut self) {
        self.closed = true;
        self.events = None;
        info!("sync client shut down");
    }
}
