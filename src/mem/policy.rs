use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use crate::collaborators::persistence::PostingMode;
use crate::collaborators::policy::Policy;
use crate::headers::ArticleHeaders;
use crate::identifiers::{MessageId, NewsgroupName};

/// In-memory [`Policy`] reference implementation: four independent
/// always/never switches, defaulting to permissive. Real deployments would
/// consult moderation queues, trust lists, etc.; this is a worked example
/// and a test fixture, not a policy engine.
pub struct MemPolicy {
    posting_allowed: AtomicBool,
    ihave_allowed: AtomicBool,
    newsgroup_allowed: AtomicBool,
    article_allowed: AtomicBool,
}

impl MemPolicy {
    pub fn new() -> Self {
        MemPolicy {
            posting_allowed: AtomicBool::new(true),
            ihave_allowed: AtomicBool::new(true),
            newsgroup_allowed: AtomicBool::new(true),
            article_allowed: AtomicBool::new(true),
        }
    }

    pub fn set_posting_allowed(&self, allowed: bool) {
        self.posting_allowed.store(allowed, Ordering::Relaxed);
    }

    pub fn set_ihave_allowed(&self, allowed: bool) {
        self.ihave_allowed.store(allowed, Ordering::Relaxed);
    }

    pub fn set_article_allowed(&self, allowed: bool) {
        self.article_allowed.store(allowed, Ordering::Relaxed);
    }
}

impl Default for MemPolicy {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Policy for MemPolicy {
    async fn is_posting_allowed(&self, _subject: Option<&str>) -> bool {
        self.posting_allowed.load(Ordering::Relaxed)
    }

    async fn is_ihave_transfer_allowed(&self, _subject: Option<&str>) -> bool {
        self.ihave_allowed.load(Ordering::Relaxed)
    }

    async fn is_newsgroup_allowed(
        &self,
        _name: &NewsgroupName,
        _mode: PostingMode,
        _est_count: u64,
        _peer: Option<&str>,
    ) -> bool {
        self.newsgroup_allowed.load(Ordering::Relaxed)
    }

    async fn is_article_allowed(
        &self,
        _id: &MessageId,
        _headers: &ArticleHeaders,
        _body: &str,
        _destination: &NewsgroupName,
        _mode: PostingMode,
        _subject: Option<&str>,
    ) -> bool {
        self.article_allowed.load(Ordering::Relaxed)
    }
}
