//! ARTICLE, HEAD, BODY, STAT and OVER/XOVER.
//!
//! The four retrieval commands share one resolution routine parameterized
//! by which sections to emit, matching the teacher's `article_handler!`
//! macro-generated dispatch but written out as a plain enum since the
//! per-operation differences here are just "which parts to emit" rather
//! than four near-identical trait impls.

use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncWrite};

use crate::collaborators::DynNewsgroup;
use crate::collaborators::persistence::Article;
use crate::handlers::utils::{overview_line, require_current, require_group};
use crate::handlers::{CommandHandler, HandlerContext, HandlerResult};
use crate::identifiers::{ArticleNumber, MessageId};
use crate::responses::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArticleOperation {
    Article,
    Head,
    Body,
    Stat,
}

impl ArticleOperation {
    fn code(self) -> &'static str {
        match self {
            ArticleOperation::Article => RESP_220_ARTICLE,
            ArticleOperation::Head => RESP_221_HEAD,
            ArticleOperation::Body => RESP_222_BODY,
            ArticleOperation::Stat => RESP_223_STAT,
        }
    }

    fn sends_headers(self) -> bool {
        matches!(self, ArticleOperation::Article | ArticleOperation::Head)
    }

    fn sends_body(self) -> bool {
        matches!(self, ArticleOperation::Article | ArticleOperation::Body)
    }
}

/// What resolving an ARTICLE/HEAD/BODY/STAT/OVER argument produced.
enum Resolved {
    /// The reply for a failure case has already been written; the handler
    /// should return `Ok(true)` immediately.
    Handled,
    Found { number: u64, article: Arc<Article> },
}

/// Implements the shared `[id|number]` argument resolution of §4.4: zero
/// args use the session's current article; a `<...>` argument is a
/// message-id lookup that never moves the cursor; a bare-digit argument is
/// a group-relative number that does.
async fn resolve<R, W>(
    ctx: &mut HandlerContext<'_, R, W>,
    args: &[String],
) -> anyhow::Result<Resolved>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    if args.len() > 1 {
        ctx.framing.write_response_line(RESP_501_SYNTAX).await?;
        return Ok(Resolved::Handled);
    }

    if args.is_empty() {
        let Some(group) = require_group(ctx).await? else {
            return Ok(Resolved::Handled);
        };
        let Some(number) = require_current(ctx).await? else {
            return Ok(Resolved::Handled);
        };
        let Some(id) = group
            .get_article_numbered(ArticleNumber::new(number).expect("cursor is always >= 1"))
            .await
        else {
            ctx.framing
                .write_response_line(RESP_420_NO_CURRENT_ARTICLE)
                .await?;
            return Ok(Resolved::Handled);
        };
        let article = ctx
            .session
            .persistence
            .get_article(&id)
            .await
            .expect("current article's id is registered in persistence");
        return Ok(Resolved::Found { number, article });
    }

    let arg = &args[0];
    if MessageId::looks_like(arg) {
        let Ok(id) = MessageId::parse(arg) else {
            ctx.framing
                .write_response_line(RESP_430_NO_SUCH_ARTICLE)
                .await?;
            return Ok(Resolved::Handled);
        };
        let Some(article) = ctx.session.persistence.get_article(&id).await else {
            ctx.framing
                .write_response_line(RESP_430_NO_SUCH_ARTICLE)
                .await?;
            return Ok(Resolved::Handled);
        };
        // Message-id lookups never move the cursor, and the number
        // reported is 0 if no group is currently selected or the article
        // isn't in it.
        let number = match ctx.session.selected_group() {
            Some(g) => g.number_of(&id).await.map(|n| n.get()).unwrap_or(0),
            None => 0,
        };
        return Ok(Resolved::Found { number, article });
    }

    let Some(group) = require_group(ctx).await? else {
        return Ok(Resolved::Handled);
    };
    let Ok(n) = arg.parse::<u64>() else {
        ctx.framing.write_response_line(RESP_501_SYNTAX).await?;
        return Ok(Resolved::Handled);
    };
    let Ok(number) = ArticleNumber::new(n) else {
        ctx.framing.write_response_line(RESP_501_SYNTAX).await?;
        return Ok(Resolved::Handled);
    };
    let Some(id) = group.get_article_numbered(number).await else {
        ctx.framing
            .write_response_line(RESP_423_NO_SUCH_ARTICLE_NUMBER)
            .await?;
        return Ok(Resolved::Handled);
    };
    let article = ctx
        .session
        .persistence
        .get_article(&id)
        .await
        .expect("numbered article is registered in persistence");
    ctx.session.set_current_article(n);
    Ok(Resolved::Found { number: n, article })
}

pub async fn handle_article_operation<R, W>(
    ctx: &mut HandlerContext<'_, R, W>,
    args: &[String],
    op: ArticleOperation,
) -> HandlerResult
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    let (number, article) = match resolve(ctx, args).await? {
        Resolved::Handled => return Ok(true),
        Resolved::Found { number, article } => (number, article),
    };

    ctx.framing
        .write_response_line(&article_status(op.code(), number, article.id.as_str()))
        .await?;

    if op.sends_headers() {
        for (name, values) in article.headers.iter() {
            for value in values {
                ctx.framing
                    .write_data_line(&format!("{name}: {value}"))
                    .await?;
            }
        }
    }
    if op == ArticleOperation::Article {
        ctx.framing.write_data_line("").await?;
    }
    if op.sends_body() {
        for line in article.body.split("\r\n") {
            ctx.framing.write_verbatim_line(line).await?;
        }
    }
    if op.sends_headers() || op.sends_body() {
        ctx.framing.write_dot_terminator().await?;
    }
    Ok(true)
}

/// OVER / XOVER (XOVER is a literal alias, dispatched to this same handler).
pub struct OverHandler;

impl CommandHandler for OverHandler {
    async fn handle<R, W>(ctx: &mut HandlerContext<'_, R, W>, args: &[String]) -> HandlerResult
    where
        R: AsyncBufRead + Unpin + Send,
        W: AsyncWrite + Unpin + Send,
    {
        if args.len() > 1 {
            ctx.framing.write_response_line(RESP_501_SYNTAX).await?;
            return Ok(true);
        }

        if args.is_empty() {
            let Some(group) = require_group(ctx).await? else {
                return Ok(true);
            };
            let Some(number) = require_current(ctx).await? else {
                return Ok(true);
            };
            let Some(id) = group
                .get_article_numbered(ArticleNumber::new(number).expect("cursor is always >= 1"))
                .await
            else {
                ctx.framing
                    .write_response_line(RESP_420_NO_CURRENT_ARTICLE)
                    .await?;
                return Ok(true);
            };
            let article = ctx
                .session
                .persistence
                .get_article(&id)
                .await
                .expect("current article's id is registered in persistence");
            ctx.framing.write_response_line(RESP_224_OVERVIEW).await?;
            ctx.framing
                .write_data_line(overview_line(number, &article).trim_end_matches("\r\n"))
                .await?;
            ctx.framing.write_dot_terminator().await?;
            return Ok(true);
        }

        let arg = &args[0];
        if MessageId::looks_like(arg) {
            let Ok(id) = MessageId::parse(arg) else {
                ctx.framing
                    .write_response_line(RESP_430_NO_SUCH_ARTICLE)
                    .await?;
                return Ok(true);
            };
            let Some(article) = ctx.session.persistence.get_article(&id).await else {
                ctx.framing
                    .write_response_line(RESP_430_NO_SUCH_ARTICLE)
                    .await?;
                return Ok(true);
            };
            let number = match ctx.session.selected_group() {
                Some(g) => g.number_of(&id).await.map(|n| n.get()).unwrap_or(0),
                None => 0,
            };
            ctx.framing.write_response_line(RESP_224_OVERVIEW).await?;
            ctx.framing
                .write_data_line(overview_line(number, &article).trim_end_matches("\r\n"))
                .await?;
            ctx.framing.write_dot_terminator().await?;
            return Ok(true);
        }

        let Some(group) = require_group(ctx).await? else {
            return Ok(true);
        };
        let (low, high) = match parse_over_range(arg, &group).await {
            Ok(range) => range,
            Err(RangeError::Syntax) => {
                ctx.framing.write_response_line(RESP_501_SYNTAX).await?;
                return Ok(true);
            }
        };
        let numbers = group.get_articles_numbered(low, high).await;
        if numbers.is_empty() {
            ctx.framing
                .write_response_line(RESP_423_NO_ARTICLE_IN_RANGE)
                .await?;
            return Ok(true);
        }
        ctx.framing.write_response_line(RESP_224_OVERVIEW).await?;
        for number in numbers {
            let id = group
                .get_article_numbered(number)
                .await
                .expect("number came from get_articles_numbered");
            let article = ctx
                .session
                .persistence
                .get_article(&id)
                .await
                .expect("numbered article is registered in persistence");
            ctx.framing
                .write_data_line(overview_line(number.get(), &article).trim_end_matches("\r\n"))
                .await?;
        }
        ctx.framing.write_dot_terminator().await?;
        Ok(true)
    }
}

enum RangeError {
    Syntax,
}

/// Parses OVER/XOVER's `n`, `n-`, `n-m` range forms. A leading `-m` form
/// (open-ended below) is rejected with 501, per the spec's resolution of
/// the source's inconsistent handling of that form (§9 open questions).
async fn parse_over_range(spec: &str, group: &DynNewsgroup) -> Result<(u64, u64), RangeError> {
    if spec.starts_with('-') {
        return Err(RangeError::Syntax);
    }
    if let Some((start_s, end_s)) = spec.split_once('-') {
        let start: u64 = start_s.parse().map_err(|_| RangeError::Syntax)?;
        if end_s.is_empty() {
            let metrics = group.metrics().await;
            let high = if metrics.high < 0 {
                start
            } else {
                metrics.high as u64
            };
            Ok((start, high))
        } else {
            let end: u64 = end_s.parse().map_err(|_| RangeError::Syntax)?;
            Ok((start, end))
        }
    } else {
        let n: u64 = spec.parse().map_err(|_| RangeError::Syntax)?;
        Ok((n, n))
    }
}
