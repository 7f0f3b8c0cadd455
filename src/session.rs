//! Per-connection session state.
//!
//! Per the redesign note in spec §9, the current-article cursor is owned
//! here rather than on the collaborator-side `Newsgroup` object: it is
//! per-connection state, not persistent data, and conflating the two made
//! the source's cursor movement rules (NEXT/LAST, message-id lookups that
//! must not disturb it) harder to reason about than they need to be.

use crate::collaborators::{DynIdentity, DynNewsgroup, DynPersistence, DynPolicy};

/// All state owned by one TCP connection's worker for its lifetime.
pub struct ClientSession {
    pub persistence: DynPersistence,
    pub identity: DynIdentity,
    pub policy: DynPolicy,

    selected_group: Option<DynNewsgroup>,
    current_article: Option<u64>,

    /// The most recently tokenized request line, set by the engine before
    /// each handler dispatch.
    pub request_args: Vec<String>,

    /// Always `None`: AUTHINFO is a non-goal, so no session ever carries an
    /// authenticated subject. Kept as a field (rather than omitted) so the
    /// policy calls that accept `subject: Option<&str>` have a natural,
    /// single place to read it from once authentication is added.
    pub auth_subject: Option<String>,
}

impl ClientSession {
    pub fn new(persistence: DynPersistence, identity: DynIdentity, policy: DynPolicy) -> Self {
        ClientSession {
            persistence,
            identity,
            policy,
            selected_group: None,
            current_article: None,
            request_args: Vec::new(),
            auth_subject: None,
        }
    }

    pub fn selected_group(&self) -> Option<&DynNewsgroup> {
        self.selected_group.as_ref()
    }

    /// Selects `group` and resets the cursor to `low` (or clears it if the
    /// group is empty), per GROUP's semantics.
    pub fn select_group(&mut self, group: DynNewsgroup, low_if_nonempty: Option<u64>) {
        self.selected_group = Some(group);
        self.current_article = low_if_nonempty;
    }

    pub fn current_article(&self) -> Option<u64> {
        self.current_article
    }

    /// Sets the cursor directly. Used by NEXT/LAST and by ARTICLE/HEAD/
    /// BODY/STAT's numeric-argument form; never called for the message-id
    /// argument form (§8 invariant: message-id lookups never move the
    /// cursor).
    pub fn set_current_article(&mut self, number: u64) {
        self.current_article = Some(number);
    }

    pub fn subject(&self) -> Option<&str> {
        self.auth_subject.as_deref()
    }
}
