//! The whole client-side view: the latest confirmed canonical snapshot
//! plus the transient edit state layered over it. Replacing the snapshot
//! and reconciling the transient state is one deterministic step.

use azkar_shared::AppData;

use crate::interval::IntervalDisplay;
use crate::list::ListEditor;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub data: AppData,
    pub interval: IntervalDisplay,
    pub list: ListEditor,
    pub autostart: bool,
}

impl ViewState {
    pub fn new(data: AppData, autostart: bool) -> Self {
        let interval = IntervalDisplay::derive(data.interval_seconds);
        Self {
            data,
            interval,
            list: ListEditor::new(),
            autostart,
        }
    }

    /// Wholesale replacement of the canonical snapshot. The interval
    /// display re-derives only past drift tolerance and the list editor
    /// drops a session whose target is gone; everything else survives.
    pub fn apply_snapshot(&mut self, data: AppData) {
        self.interval.reconcile(data.interval_seconds);
        self.list.reconcile(&data.azkar);
        self.data = data;
    }
}
