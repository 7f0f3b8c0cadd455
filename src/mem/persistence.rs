use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::collaborators::persistence::{Article, DynNewsgroup, Newsgroup, Persistence, PostingMode};
use crate::identifiers::{ArticleNumber, MessageId, NewsgroupMetrics, NewsgroupName};

struct ArticleRecord {
    article: Arc<Article>,
    stored_at: DateTime<Utc>,
    rejected: bool,
}

#[derive(Default)]
struct PersistenceState {
    articles: HashMap<MessageId, ArticleRecord>,
    // insertion order, for deterministic `get_article_ids_after`/listing.
    order: Vec<MessageId>,
    groups: Vec<Arc<MemNewsgroup>>,
}

/// In-memory [`Persistence`] reference implementation.
pub struct MemPersistence {
    state: RwLock<PersistenceState>,
}

impl MemPersistence {
    pub fn new() -> Self {
        MemPersistence {
            state: RwLock::new(PersistenceState::default()),
        }
    }
}

impl Default for MemPersistence {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Persistence for MemPersistence {
    async fn has_article(&self, id: &MessageId) -> bool {
        self.state.read().await.articles.contains_key(id)
    }

    async fn get_article(&self, id: &MessageId) -> Option<Arc<Article>> {
        self.state
            .read()
            .await
            .articles
            .get(id)
            .map(|r| r.article.clone())
    }

    async fn is_rejected_article(&self, id: &MessageId) -> bool {
        self.state
            .read()
            .await
            .articles
            .get(id)
            .map(|r| r.rejected)
            .unwrap_or(false)
    }

    async fn reject_article(&self, id: &MessageId) {
        if let Some(r) = self.state.write().await.articles.get_mut(id) {
            r.rejected = true;
        }
    }

    async fn store_article(&self, article: Article) {
        let mut state = self.state.write().await;
        let id = article.id.clone();
        state.order.push(id.clone());
        state.articles.insert(
            id,
            ArticleRecord {
                article: Arc::new(article),
                stored_at: Utc::now(),
                rejected: false,
            },
        );
    }

    async fn get_article_ids_after(&self, since: DateTime<Utc>) -> Vec<MessageId> {
        let state = self.state.read().await;
        state
            .order
            .iter()
            .filter(|id| {
                state
                    .articles
                    .get(*id)
                    .map(|r| r.stored_at >= since)
                    .unwrap_or(false)
            })
            .cloned()
            .collect()
    }

    async fn add_group(
        &self,
        name: NewsgroupName,
        description: String,
        mode: PostingMode,
    ) -> DynNewsgroup {
        let group = Arc::new(MemNewsgroup::new(name, description, mode));
        self.state.write().await.groups.push(group.clone());
        group
    }

    async fn list_all_groups(&self) -> Vec<DynNewsgroup> {
        self.state
            .read()
            .await
            .groups
            .iter()
            .cloned()
            .map(|g| g as DynNewsgroup)
            .collect()
    }

    async fn list_all_groups_added_since(&self, since: DateTime<Utc>) -> Vec<DynNewsgroup> {
        self.state
            .read()
            .await
            .groups
            .iter()
            .filter(|g| g.created_at() >= since)
            .cloned()
            .map(|g| g as DynNewsgroup)
            .collect()
    }

    async fn get_group_by_name(&self, name: &NewsgroupName) -> Option<DynNewsgroup> {
        self.state
            .read()
            .await
            .groups
            .iter()
            .find(|g| g.name() == name)
            .cloned()
            .map(|g| g as DynNewsgroup)
    }
}

struct GroupState {
    posting_mode: PostingMode,
    ignored: bool,
    numbered: BTreeMap<u64, MessageId>,
    next_number: u64,
}

/// In-memory [`Newsgroup`] reference implementation. The cursor is
/// deliberately absent here: it lives on `ClientSession`.
pub struct MemNewsgroup {
    name: NewsgroupName,
    description: String,
    created_at: DateTime<Utc>,
    state: RwLock<GroupState>,
}

impl MemNewsgroup {
    fn new(name: NewsgroupName, description: String, mode: PostingMode) -> Self {
        MemNewsgroup {
            name,
            description,
            created_at: Utc::now(),
            state: RwLock::new(GroupState {
                posting_mode: mode,
                ignored: false,
                numbered: BTreeMap::new(),
                next_number: 1,
            }),
        }
    }
}

#[async_trait]
impl Newsgroup for MemNewsgroup {
    fn name(&self) -> &NewsgroupName {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    async fn metrics(&self) -> NewsgroupMetrics {
        let state = self.state.read().await;
        if state.numbered.is_empty() {
            return NewsgroupMetrics::empty();
        }
        let low = *state.numbered.keys().next().unwrap();
        let high = *state.numbered.keys().next_back().unwrap();
        NewsgroupMetrics {
            count: state.numbered.len() as u64,
            low,
            high: high as i64,
        }
    }

    async fn include_article(&self, id: MessageId) -> ArticleNumber {
        let mut state = self.state.write().await;
        let n = state.next_number;
        state.next_number += 1;
        state.numbered.insert(n, id);
        ArticleNumber::new(n).expect("next_number starts at 1 and only increases")
    }

    async fn number_of(&self, id: &MessageId) -> Option<ArticleNumber> {
        let state = self.state.read().await;
        state
            .numbered
            .iter()
            .find(|(_, v)| *v == id)
            .map(|(n, _)| ArticleNumber::new(*n).expect("stored numbers are >= 1"))
    }

    async fn get_article_numbered(&self, number: ArticleNumber) -> Option<MessageId> {
        self.state.read().await.numbered.get(&number.get()).cloned()
    }

    async fn get_articles_numbered(&self, low: u64, high: u64) -> Vec<ArticleNumber> {
        self.state
            .read()
            .await
            .numbered
            .range(low..=high)
            .map(|(n, _)| ArticleNumber::new(*n).expect("stored numbers are >= 1"))
            .collect()
    }

    async fn next_after(&self, from: u64) -> Option<ArticleNumber> {
        self.state
            .read()
            .await
            .numbered
            .range(from + 1..)
            .next()
            .map(|(n, _)| ArticleNumber::new(*n).expect("stored numbers are >= 1"))
    }

    async fn previous_before(&self, from: u64) -> Option<ArticleNumber> {
        if from == 0 {
            return None;
        }
        self.state
            .read()
            .await
            .numbered
            .range(..from)
            .next_back()
            .map(|(n, _)| ArticleNumber::new(*n).expect("stored numbers are >= 1"))
    }

    async fn get_articles_since(&self, since: DateTime<Utc>) -> Vec<MessageId> {
        // The reference backend doesn't timestamp per-group inclusion
        // separately from the article's own storage time, so this is left
        // unimplemented for the in-memory group: NEWNEWS is answered at the
        // `Persistence::get_article_ids_after` level instead (see
        // `handlers::list::NewNewsHandler`).
        let _ = since;
        Vec::new()
    }

    async fn posting_mode(&self) -> PostingMode {
        self.state.read().await.posting_mode
    }

    async fn set_posting_mode(&self, mode: PostingMode) {
        self.state.write().await.posting_mode = mode;
    }

    async fn is_ignored(&self) -> bool {
        self.state.read().await.ignored
    }

    async fn set_ignored(&self, ignored: bool) {
        self.state.write().await.ignored = ignored;
    }
}
