//! Inline-edit state for the phrase list. At most one item is ever in
//! edit mode, modeled as an optional session rather than ambient flags.
//! Mutations are only ever confirmed by the store; this module decides
//! what is allowed to be requested and what happens to drafts.

use azkar_shared::{AddZekrArgs, UpdateZekrArgs, Zekr};
use tracing::debug;

/// The one item currently being edited and its draft text. Lives only
/// between begin-edit and save/cancel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    pub target_id: String,
    pub draft: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListEditor {
    pub session: Option<EditSession>,
    pub new_text: String,
}

impl ListEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts editing `zekr`, seeding the draft from its current text.
    /// Switching targets silently drops any previous draft.
    pub fn begin_edit(&mut self, zekr: &Zekr) {
        self.session = Some(EditSession {
            target_id: zekr.id.clone(),
            draft: zekr.text.clone(),
        });
    }

    pub fn edit_draft(&mut self, draft: impl Into<String>) {
        if let Some(session) = self.session.as_mut() {
            session.draft = draft.into();
        }
    }

    pub fn cancel_edit(&mut self) {
        self.session = None;
    }

    /// The update command to issue, or None when there is no session or
    /// the draft trims to empty. The session itself is untouched; it is
    /// cleared only once the store confirms.
    pub fn save_request(&self) -> Option<UpdateZekrArgs> {
        let session = self.session.as_ref()?;
        if session.draft.trim().is_empty() {
            return None;
        }
        Some(UpdateZekrArgs {
            id: session.target_id.clone(),
            text: session.draft.clone(),
        })
    }

    pub fn save_confirmed(&mut self) {
        self.session = None;
    }

    pub fn set_new_text(&mut self, text: impl Into<String>) {
        self.new_text = text.into();
    }

    /// The add command to issue, or None when the input trims to empty.
    /// The command carries the raw untrimmed text; the input box is
    /// cleared only once the store confirms.
    pub fn add_request(&self) -> Option<AddZekrArgs> {
        if self.new_text.trim().is_empty() {
            return None;
        }
        Some(AddZekrArgs {
            text: self.new_text.clone(),
        })
    }

    pub fn add_confirmed(&mut self) {
        self.new_text.clear();
    }

    /// Called with every new canonical list. A session whose target no
    /// longer exists (removed here or elsewhere) is stale and dropped.
    pub fn reconcile(&mut self, items: &[Zekr]) {
        if let Some(session) = self.session.as_ref()
            && !items.iter().any(|zekr| zekr.id == session.target_id)
        {
            debug!(
                target_id = %session.target_id,
                "edit target gone from canonical list; clearing session"
            );
            self.session = None;
        }
    }
}
