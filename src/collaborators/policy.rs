//! The policy collaborator: the admission decisions POST/IHAVE and group
//! listing consult. AUTHINFO is a non-goal, so sessions never carry an
//! authenticated identity beyond the anonymous subject; `subject` is
//! threaded through regardless so a host application adding authentication
//! later has a seam to plug into without reshaping this trait.

use std::sync::Arc;

use async_trait::async_trait;

use crate::collaborators::persistence::PostingMode;
use crate::headers::ArticleHeaders;
use crate::identifiers::{MessageId, NewsgroupName};

pub type DynPolicy = Arc<dyn Policy>;

#[async_trait]
pub trait Policy: Send + Sync {
    /// Whether `subject` may POST at all.
    async fn is_posting_allowed(&self, subject: Option<&str>) -> bool;

    /// Whether `subject` may IHAVE-transfer articles in.
    async fn is_ihave_transfer_allowed(&self, subject: Option<&str>) -> bool;

    /// Whether a newsgroup named `name` (in posting mode `mode`, with
    /// estimated article count `est_count`) may be advertised/accepted from
    /// `peer`. Consulted by group listing and transfer admission.
    async fn is_newsgroup_allowed(
        &self,
        name: &NewsgroupName,
        mode: PostingMode,
        est_count: u64,
        peer: Option<&str>,
    ) -> bool;

    /// Whether a specific article may be accepted into `destination` (in
    /// posting mode `mode`) on behalf of `subject`. This is where
    /// moderation/approval policy for `Moderated` groups is decided.
    async fn is_article_allowed(
        &self,
        id: &MessageId,
        headers: &ArticleHeaders,
        body: &str,
        destination: &NewsgroupName,
        mode: PostingMode,
        subject: Option<&str>,
    ) -> bool;
}
