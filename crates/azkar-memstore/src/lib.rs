//! In-memory reference implementation of the store side of the command
//! bridge, with the same semantics the background process exposes: opaque
//! id minting on add, full post-mutation snapshots from every command,
//! and the `data-updated` signal for out-of-band changes. Tests use it as
//! the external collaborator, with knobs to inject failures and response
//! latency.

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Result, bail};
use azkar_client::CommandBridge;
use azkar_shared::{
    AddZekrArgs, AppData, DATA_UPDATED_EVENT, RemoveZekrArgs, SetAutostartArgs, SetIntervalArgs,
    UpdateZekrArgs, Zekr,
};
use chrono::{Local, Utc};
use parking_lot::Mutex;
use tokio::sync::mpsc;
use tracing::debug;
use uuid::Uuid;

#[derive(Clone)]
pub struct MemStore {
    inner: Arc<Inner>,
}

struct Inner {
    data: Mutex<AppData>,
    autostart: Mutex<bool>,
    subscribers: Mutex<Vec<mpsc::UnboundedSender<()>>>,
    fail_next: Mutex<HashSet<String>>,
    set_interval_delays: Mutex<VecDeque<Duration>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                data: Mutex::new(AppData {
                    azkar: vec![],
                    interval_seconds: 60,
                    daily_count: 0,
                    last_reset_date: Local::now().format("%Y-%m-%d").to_string(),
                    last_notification_time: 0,
                    is_paused: false,
                }),
                autostart: Mutex::new(false),
                subscribers: Mutex::new(vec![]),
                fail_next: Mutex::new(HashSet::new()),
                set_interval_delays: Mutex::new(VecDeque::new()),
            }),
        }
    }

    /// Seeds phrases directly, returning their minted ids. No event is
    /// emitted; use [`Self::simulate_notification`] for that.
    pub fn seed<'a>(&self, texts: impl IntoIterator<Item = &'a str>) -> Vec<String> {
        let mut data = self.inner.data.lock();
        texts
            .into_iter()
            .map(|text| {
                let id = Uuid::new_v4().to_string();
                data.azkar.push(Zekr {
                    id: id.clone(),
                    text: text.to_string(),
                });
                id
            })
            .collect()
    }

    pub fn snapshot(&self) -> AppData {
        self.inner.data.lock().clone()
    }

    pub fn set_interval_seconds(&self, seconds: u64) {
        self.inner.data.lock().interval_seconds = seconds;
    }

    pub fn autostart(&self) -> bool {
        *self.inner.autostart.lock()
    }

    /// The next invocation of `command` fails with an injected error.
    pub fn fail_next(&self, command: &str) {
        self.inner.fail_next.lock().insert(command.to_string());
    }

    /// Queues a response delay for `set_interval`; each call consumes one
    /// entry. The mutation still lands at call time, only the response
    /// leg is late.
    pub fn delay_set_interval(&self, delay: Duration) {
        self.inner.set_interval_delays.lock().push_back(delay);
    }

    /// Stands in for the scheduler thread: records a fired notification
    /// and emits the change signal.
    pub fn simulate_notification(&self) {
        {
            let mut data = self.inner.data.lock();
            data.daily_count += 1;
            data.last_notification_time = Utc::now().timestamp().max(0) as u64;
        }
        self.emit_data_updated();
    }

    fn emit_data_updated(&self) {
        let mut subscribers = self.inner.subscribers.lock();
        subscribers.retain(|tx| tx.send(()).is_ok());
        debug!(
            subscribers = subscribers.len(),
            event = DATA_UPDATED_EVENT,
            "emitted change notification"
        );
    }

    fn check_fail(&self, command: &str) -> Result<()> {
        if self.inner.fail_next.lock().remove(command) {
            bail!("injected {command} failure");
        }
        Ok(())
    }
}

impl Default for MemStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandBridge for MemStore {
    async fn get_data(&self) -> Result<AppData> {
        self.check_fail("get_data")?;
        Ok(self.snapshot())
    }

    async fn get_autostart(&self) -> Result<bool> {
        self.check_fail("get_autostart")?;
        Ok(*self.inner.autostart.lock())
    }

    async fn set_autostart(&self, args: SetAutostartArgs) -> Result<()> {
        self.check_fail("set_autostart")?;
        *self.inner.autostart.lock() = args.enable;
        Ok(())
    }

    async fn add_zekr(&self, args: AddZekrArgs) -> Result<AppData> {
        self.check_fail("add_zekr")?;
        let mut data = self.inner.data.lock();
        data.azkar.push(Zekr {
            id: Uuid::new_v4().to_string(),
            text: args.text,
        });
        Ok(data.clone())
    }

    async fn remove_zekr(&self, args: RemoveZekrArgs) -> Result<AppData> {
        self.check_fail("remove_zekr")?;
        let mut data = self.inner.data.lock();
        data.azkar.retain(|zekr| zekr.id != args.id);
        Ok(data.clone())
    }

    async fn update_zekr(&self, args: UpdateZekrArgs) -> Result<AppData> {
        self.check_fail("update_zekr")?;
        let mut data = self.inner.data.lock();
        if let Some(zekr) = data.azkar.iter_mut().find(|zekr| zekr.id == args.id) {
            zekr.text = args.text;
        }
        Ok(data.clone())
    }

    async fn set_interval(&self, args: SetIntervalArgs) -> Result<AppData> {
        self.check_fail("set_interval")?;
        let delay = self.inner.set_interval_delays.lock().pop_front();
        let snapshot = {
            let mut data = self.inner.data.lock();
            data.interval_seconds = args.seconds;
            data.clone()
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        Ok(snapshot)
    }

    async fn toggle_pause(&self) -> Result<AppData> {
        self.check_fail("toggle_pause")?;
        let mut data = self.inner.data.lock();
        data.is_paused = !data.is_paused;
        Ok(data.clone())
    }

    fn subscribe_data_updated(&self) -> mpsc::UnboundedReceiver<()> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.inner.subscribers.lock().push(tx);
        rx
    }
}
