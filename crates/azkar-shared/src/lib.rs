use serde::{Deserialize, Serialize};

/// Name of the host event emitted whenever the canonical store changes
/// out-of-band (the scheduler fired, another window mutated the list).
/// The event carries no payload; receivers refetch the full state.
pub const DATA_UPDATED_EVENT: &str = "data-updated";

/// A single remembrance phrase. The id is minted by the store and is
/// opaque to the client; identity comparisons use it verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Zekr {
    pub id: String,
    pub text: String,
}

/// The canonical application snapshot owned by the background store.
/// Clients never patch individual fields; every mutating command and
/// every refetch replaces the whole value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppData {
    pub azkar: Vec<Zekr>,
    pub interval_seconds: u64,

    #[serde(default)]
    pub daily_count: u64,

    #[serde(default)]
    pub last_reset_date: String,

    #[serde(default)]
    pub last_notification_time: u64,

    #[serde(default)]
    pub is_paused: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddZekrArgs {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoveZekrArgs {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateZekrArgs {
    pub id: String,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetIntervalArgs {
    pub seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetAutostartArgs {
    pub enable: bool,
}
