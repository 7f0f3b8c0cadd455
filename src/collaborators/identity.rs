//! The identity collaborator: who this server is, and how it mints fresh
//! message-ids for locally originated articles.

use std::sync::Arc;

use async_trait::async_trait;

use crate::headers::ArticleHeaders;
use crate::identifiers::MessageId;

pub type DynIdentity = Arc<dyn Identity>;

#[async_trait]
pub trait Identity: Send + Sync {
    /// The host identifier used in `Path:` trails and the startup log
    /// article, e.g. `news.example.org`.
    fn host_identifier(&self) -> &str;

    /// Mints a fresh, globally-unique message-id for an article that needs
    /// one (currently only the §6.5 startup log entry; POST/IHAVE articles
    /// always carry their own `Message-ID`).
    async fn create_message_id(&self, headers: &ArticleHeaders) -> MessageId;
}
