//! IHAVE: peer-originated article transfer (§4.4).
//!
//! Distinct from POST in its reply codes and in checking rejection history
//! up front, but otherwise shares the same per-newsgroup acceptance loop.

use tokio::io::{AsyncBufRead, AsyncWrite};

use crate::collaborators::DynNewsgroup;
use crate::collaborators::persistence::{Article, PostingMode};
use crate::handlers::utils::parse_and_validate_body;
use crate::handlers::{CommandHandler, HandlerContext, HandlerResult};
use crate::identifiers::{MessageId, NewsgroupName};
use crate::responses::*;

pub struct IhaveHandler;

impl CommandHandler for IhaveHandler {
    async fn handle<R, W>(ctx: &mut HandlerContext<'_, R, W>, args: &[String]) -> HandlerResult
    where
        R: AsyncBufRead + Unpin + Send,
        W: AsyncWrite + Unpin + Send,
    {
        if args.len() != 1 {
            ctx.framing.write_response_line(RESP_501_SYNTAX).await?;
            return Ok(true);
        }

        let Ok(claimed_id) = MessageId::parse(&args[0]) else {
            ctx.framing.write_response_line(RESP_501_SYNTAX).await?;
            return Ok(true);
        };

        let subject = ctx.session.subject().map(|s| s.to_string());
        if !ctx
            .session
            .policy
            .is_ihave_transfer_allowed(subject.as_deref())
            .await
        {
            ctx.framing
                .write_response_line(RESP_437_TRANSFER_REJECTED)
                .await?;
            return Ok(true);
        }

        if ctx.session.persistence.has_article(&claimed_id).await
            || ctx.session.persistence.is_rejected_article(&claimed_id).await
        {
            ctx.framing.write_response_line(RESP_435_NOT_WANTED).await?;
            return Ok(true);
        }

        ctx.framing.write_response_line(RESP_335_SEND_IT).await?;

        let raw = match ctx.framing.read_until_dot().await {
            Ok(raw) => raw,
            Err(_) => {
                ctx.framing
                    .write_response_line(RESP_436_TRANSFER_FAILED)
                    .await?;
                return Ok(true);
            }
        };

        let Some((headers, body)) = parse_and_validate_body(&raw) else {
            ctx.session.persistence.reject_article(&claimed_id).await;
            ctx.framing
                .write_response_line(RESP_437_TRANSFER_REJECTED)
                .await?;
            return Ok(true);
        };

        let id_matches = headers
            .get("Message-ID")
            .map(|v| v == claimed_id.as_str())
            .unwrap_or(false);
        if !id_matches {
            ctx.session.persistence.reject_article(&claimed_id).await;
            ctx.framing
                .write_response_line(RESP_437_TRANSFER_REJECTED)
                .await?;
            return Ok(true);
        }

        let mut accepted: Vec<DynNewsgroup> = Vec::new();
        for raw_name in headers.newsgroups() {
            let Ok(name) = NewsgroupName::parse(&raw_name) else {
                continue;
            };
            let Some(group) = ctx.session.persistence.get_group_by_name(&name).await else {
                continue;
            };
            if group.is_ignored().await {
                continue;
            }
            let mode = group.posting_mode().await;
            if mode == PostingMode::Prohibited {
                continue;
            }
            let allowed = ctx
                .session
                .policy
                .is_article_allowed(&claimed_id, &headers, &body, &name, mode, subject.as_deref())
                .await;
            if allowed {
                accepted.push(group);
            }
        }

        if accepted.is_empty() {
            ctx.session.persistence.reject_article(&claimed_id).await;
            ctx.framing
                .write_response_line(RESP_437_TRANSFER_REJECTED)
                .await?;
            return Ok(true);
        }

        ctx.session
            .persistence
            .store_article(Article {
                id: claimed_id.clone(),
                headers,
                body,
            })
            .await;
        for group in accepted {
            group.include_article(claimed_id.clone()).await;
        }

        ctx.framing
            .write_response_line(RESP_235_TRANSFER_OK)
            .await?;
        Ok(true)
    }
}
