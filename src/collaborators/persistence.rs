//! The persistence collaborator: articles, newsgroups, and the operations
//! the engine needs on each. This is a contract only — the concrete backend
//! (on-disk database, in-memory map, whatever) is an out-of-scope
//! implementation detail; [`crate::mem`] ships a minimal in-memory one for
//! this crate's own tests.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::identifiers::{ArticleNumber, MessageId, NewsgroupMetrics, NewsgroupName};
use crate::headers::ArticleHeaders;

pub type DynPersistence = Arc<dyn Persistence>;
pub type DynNewsgroup = Arc<dyn Newsgroup>;

/// Per-group policy on whether posted articles are accepted outright,
/// accepted-but-flagged, or refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostingMode {
    Allowed,
    Moderated,
    Prohibited,
}

/// An immutable article: one id, one header set, one body held already in
/// wire/transmission form (dot-stuffed) per the storage convention this
/// crate preserves from its source system (§9). Rejection is a separate
/// flag tracked by [`Persistence::reject_article`], not a field here.
#[derive(Debug, Clone)]
pub struct Article {
    pub id: MessageId,
    pub headers: ArticleHeaders,
    pub body: String,
}

/// The persistence collaborator, consumed by the engine for article and
/// newsgroup storage.
///
/// The full collaborator interface in the external specification this
/// crate implements also names peer-feed bookkeeping (`addPeer`,
/// `removePeer`, `getPeers`); no command handler in §4.4 calls through to
/// it — that bookkeeping belongs to the peer-synchronization loop, which is
/// itself an out-of-scope collaborator. It is intentionally omitted here;
/// an integrator wiring up peer sync defines it on their own backend type
/// outside this trait.
#[async_trait]
pub trait Persistence: Send + Sync {
    async fn has_article(&self, id: &MessageId) -> bool;
    async fn get_article(&self, id: &MessageId) -> Option<Arc<Article>>;
    async fn is_rejected_article(&self, id: &MessageId) -> bool;
    async fn reject_article(&self, id: &MessageId);

    /// Stores an article's body and headers once, keyed by its id. Called
    /// exactly once per distinct message-id even when the article is
    /// cross-posted to several groups.
    async fn store_article(&self, article: Article);

    /// All distinct message-ids stored at or after `since`, regardless of
    /// which group(s) they were posted to, de-duplicated and in
    /// first-occurrence order.
    async fn get_article_ids_after(&self, since: DateTime<Utc>) -> Vec<MessageId>;

    async fn add_group(
        &self,
        name: NewsgroupName,
        description: String,
        mode: PostingMode,
    ) -> DynNewsgroup;
    async fn list_all_groups(&self) -> Vec<DynNewsgroup>;
    async fn list_all_groups_added_since(&self, since: DateTime<Utc>) -> Vec<DynNewsgroup>;
    async fn get_group_by_name(&self, name: &NewsgroupName) -> Option<DynNewsgroup>;

    /// Flushes any buffered state. The reference in-memory backend has
    /// nothing to flush; a durable backend overrides this.
    async fn commit(&self) {}

    /// Releases any held resources at the end of the session.
    async fn close(&self) {}
}

/// The per-group collaborator. Per the redesign note in §9, the
/// current-article cursor does **not** live here — it is owned by
/// `ClientSession` and passed explicitly into whichever operation needs it.
#[async_trait]
pub trait Newsgroup: Send + Sync {
    fn name(&self) -> &NewsgroupName;
    fn description(&self) -> &str;
    fn created_at(&self) -> DateTime<Utc>;

    async fn metrics(&self) -> NewsgroupMetrics;

    /// Assigns the next article number in this group to `id`. Used both
    /// when this group is the primary acceptor of a freshly posted article
    /// and when an already-stored article is cross-posted into it — the
    /// group-local numbering sequence is the only thing that differs
    /// between those two cases, and this method is what advances it.
    async fn include_article(&self, id: MessageId) -> ArticleNumber;

    /// This group's article number for `id`, if the article has been
    /// included in it. Looking this up never advances or alters the
    /// session's cursor — it is purely a membership query.
    async fn number_of(&self, id: &MessageId) -> Option<ArticleNumber>;

    async fn get_article_numbered(&self, number: ArticleNumber) -> Option<MessageId>;

    /// Article numbers present in `[low, high]`, ascending.
    async fn get_articles_numbered(&self, low: u64, high: u64) -> Vec<ArticleNumber>;

    /// The next numbered article strictly greater than `from`, if any.
    async fn next_after(&self, from: u64) -> Option<ArticleNumber>;

    /// The next numbered article strictly less than `from`, if any.
    async fn previous_before(&self, from: u64) -> Option<ArticleNumber>;

    async fn get_articles_since(&self, since: DateTime<Utc>) -> Vec<MessageId>;

    async fn posting_mode(&self) -> PostingMode;
    async fn set_posting_mode(&self, mode: PostingMode);

    async fn is_ignored(&self) -> bool;
    async fn set_ignored(&self, ignored: bool);
}
