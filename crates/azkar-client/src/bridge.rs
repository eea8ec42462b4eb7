//! The host's generic request/response bridge, plus its single change
//! notification channel. The production shell implements this over the
//! webview IPC; tests implement it with an in-memory store.

use anyhow::Result;
use azkar_shared::{
    AddZekrArgs, AppData, RemoveZekrArgs, SetAutostartArgs, SetIntervalArgs, UpdateZekrArgs,
};
use tokio::sync::mpsc;

/// Every fallible method is one suspension point: the call suspends the
/// issuing operation only and resolves with the store's response. All
/// state-returning commands yield the full post-mutation snapshot.
///
/// The host runs single-threaded, so no `Send` bound is imposed.
#[allow(async_fn_in_trait)]
pub trait CommandBridge {
    async fn get_data(&self) -> Result<AppData>;

    async fn get_autostart(&self) -> Result<bool>;

    async fn set_autostart(&self, args: SetAutostartArgs) -> Result<()>;

    async fn add_zekr(&self, args: AddZekrArgs) -> Result<AppData>;

    async fn remove_zekr(&self, args: RemoveZekrArgs) -> Result<AppData>;

    async fn update_zekr(&self, args: UpdateZekrArgs) -> Result<AppData>;

    async fn set_interval(&self, args: SetIntervalArgs) -> Result<AppData>;

    async fn toggle_pause(&self) -> Result<AppData>;

    /// Subscribes to the `data-updated` signal. Each received unit value
    /// means "the store changed; refetch". Dropping the receiver is the
    /// only way to unsubscribe.
    fn subscribe_data_updated(&self) -> mpsc::UnboundedReceiver<()>;
}
