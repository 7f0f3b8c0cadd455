//! POST: client-originated article submission (§4.4).

use tokio::io::{AsyncBufRead, AsyncWrite};

use crate::collaborators::DynNewsgroup;
use crate::collaborators::persistence::{Article, PostingMode};
use crate::handlers::utils::parse_and_validate_body;
use crate::handlers::{CommandHandler, HandlerContext, HandlerResult};
use crate::identifiers::{MessageId, NewsgroupName};
use crate::responses::*;

pub struct PostHandler;

impl CommandHandler for PostHandler {
    async fn handle<R, W>(ctx: &mut HandlerContext<'_, R, W>, args: &[String]) -> HandlerResult
    where
        R: AsyncBufRead + Unpin + Send,
        W: AsyncWrite + Unpin + Send,
    {
        if !args.is_empty() {
            ctx.framing.write_response_line(RESP_501_SYNTAX).await?;
            return Ok(true);
        }

        let subject = ctx.session.subject().map(|s| s.to_string());
        if !ctx
            .session
            .policy
            .is_posting_allowed(subject.as_deref())
            .await
        {
            ctx.framing
                .write_response_line(RESP_440_POSTING_NOT_PERMITTED)
                .await?;
            return Ok(true);
        }

        ctx.framing.write_response_line(RESP_340_SEND_ARTICLE).await?;

        let raw = match ctx.framing.read_until_dot().await {
            Ok(raw) => raw,
            Err(_) => {
                ctx.framing
                    .write_response_line(RESP_441_POSTING_FAILED)
                    .await?;
                return Ok(true);
            }
        };

        let Some((headers, body)) = parse_and_validate_body(&raw) else {
            ctx.framing
                .write_response_line(RESP_441_POSTING_FAILED)
                .await?;
            return Ok(true);
        };

        let Ok(id) = MessageId::parse(headers.get("Message-ID").unwrap_or_default()) else {
            ctx.framing
                .write_response_line(RESP_441_POSTING_FAILED)
                .await?;
            return Ok(true);
        };

        if ctx.session.persistence.has_article(&id).await {
            ctx.framing
                .write_response_line(RESP_441_POSTING_FAILED)
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
                .is_article_allowed(&id, &headers, &body, &name, mode, subject.as_deref())
                .await;
            if allowed {
                accepted.push(group);
            }
        }

        if accepted.is_empty() {
            ctx.framing
                .write_response_line(RESP_441_POSTING_FAILED)
                .await?;
            return Ok(true);
        }

        ctx.session
            .persistence
            .store_article(Article {
                id: id.clone(),
                headers,
                body,
            })
            .await;
        for group in accepted {
            group.include_article(id.clone()).await;
        }

        ctx.framing
            .write_response_line(RESP_240_ARTICLE_RECEIVED)
            .await?;
        Ok(true)
    }
}
