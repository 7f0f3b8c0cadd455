use async_trait::async_trait;
use uuid::Uuid;

use crate::collaborators::identity::Identity;
use crate::headers::ArticleHeaders;
use crate::identifiers::MessageId;

/// In-memory [`Identity`] reference implementation. Mints message-ids by
/// pairing a random v4 UUID with the host identifier, which is enough
/// collision resistance for a reference backend without needing a
/// persistent counter.
pub struct MemIdentity {
    host: String,
}

impl MemIdentity {
    pub fn new(host: impl Into<String>) -> Self {
        MemIdentity { host: host.into() }
    }
}

#[async_trait]
impl Identity for MemIdentity {
    fn host_identifier(&self) -> &str {
        &self.host
    }

    async fn create_message_id(&self, _headers: &ArticleHeaders) -> MessageId {
        MessageId::parse(&format!("<{}@{}>", Uuid::new_v4(), self.host))
            .expect("synthesized message-id is always well-formed")
    }
}
