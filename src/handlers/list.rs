//! GROUP, LISTGROUP, LIST, NEWGROUPS, NEWNEWS, NEXT, LAST.

use tokio::io::{AsyncBufRead, AsyncWrite};

use crate::collaborators::persistence::PostingMode;
use crate::handlers::utils::{require_current, require_group};
use crate::handlers::{CommandHandler, HandlerContext, HandlerResult};
use crate::identifiers::NewsgroupName;
use crate::parse::parse_datetime;
use crate::responses::*;
use crate::wildmat::wildmat;

fn status_char(mode: PostingMode) -> char {
    match mode {
        PostingMode::Allowed => 'y',
        PostingMode::Moderated => 'm',
        PostingMode::Prohibited => 'n',
    }
}

pub struct GroupHandler;

impl CommandHandler for GroupHandler {
    async fn handle<R, W>(ctx: &mut HandlerContext<'_, R, W>, args: &[String]) -> HandlerResult
    where
        R: AsyncBufRead + Unpin + Send,
        W: AsyncWrite + Unpin + Send,
    {
        if args.len() != 1 {
            ctx.framing.write_response_line(RESP_501_SYNTAX).await?;
            return Ok(true);
        }
        let Ok(name) = NewsgroupName::parse(&args[0]) else {
            ctx.framing.write_response_line(RESP_501_SYNTAX).await?;
            return Ok(true);
        };
        let group = match ctx.session.persistence.get_group_by_name(&name).await {
            Some(g) if !g.is_ignored().await => g,
            _ => {
                ctx.framing.write_response_line(RESP_411_NO_SUCH_GROUP).await?;
                return Ok(true);
            }
        };
        let metrics = group.metrics().await;
        let low_if_nonempty = (metrics.count > 0).then_some(metrics.low);
        let name_str = group.name().as_str().to_string();
        ctx.session.select_group(group, low_if_nonempty);
        ctx.framing
            .write_response_line(&group_selected(
                metrics.count,
                metrics.low,
                metrics.high,
                &name_str,
            ))
            .await?;
        Ok(true)
    }
}

pub struct ListGroupHandler;

impl CommandHandler for ListGroupHandler {
    async fn handle<R, W>(ctx: &mut HandlerContext<'_, R, W>, args: &[String]) -> HandlerResult
    where
        R: AsyncBufRead + Unpin + Send,
        W: AsyncWrite + Unpin + Send,
    {
        if args.len() > 1 {
            ctx.framing.write_response_line(RESP_501_SYNTAX).await?;
            return Ok(true);
        }

        let group = if let Some(arg) = args.first() {
            let Ok(name) = NewsgroupName::parse(arg) else {
                ctx.framing.write_response_line(RESP_501_SYNTAX).await?;
                return Ok(true);
            };
            match ctx.session.persistence.get_group_by_name(&name).await {
                Some(g) if !g.is_ignored().await => g,
                _ => {
                    ctx.framing.write_response_line(RESP_411_NO_SUCH_GROUP).await?;
                    return Ok(true);
                }
            }
        } else {
            match require_group(ctx).await? {
                Some(g) => g,
                None => return Ok(true),
            }
        };

        let metrics = group.metrics().await;
        ctx.framing
            .write_response_line(&group_selected(
                metrics.count,
                metrics.low,
                metrics.high,
                group.name().as_str(),
            ))
            .await?;
        if metrics.count > 0 {
            for number in group.get_articles_numbered(metrics.low, metrics.high as u64).await {
                ctx.framing.write_data_line(&number.to_string()).await?;
            }
        }
        ctx.framing.write_dot_terminator().await?;
        Ok(true)
    }
}

pub struct NextHandler;

impl CommandHandler for NextHandler {
    async fn handle<R, W>(ctx: &mut HandlerContext<'_, R, W>, args: &[String]) -> HandlerResult
    where
        R: AsyncBufRead + Unpin + Send,
        W: AsyncWrite + Unpin + Send,
    {
        if !args.is_empty() {
            ctx.framing.write_response_line(RESP_501_SYNTAX).await?;
            return Ok(true);
        }
        let Some(group) = require_group(ctx).await? else {
            return Ok(true);
        };
        let Some(current) = require_current(ctx).await? else {
            return Ok(true);
        };
        let Some(next) = group.next_after(current).await else {
            ctx.framing.write_response_line(RESP_421_NO_NEXT_ARTICLE).await?;
            return Ok(true);
        };
        let id = group
            .get_article_numbered(next)
            .await
            .expect("next_after returned a registered number");
        ctx.session.set_current_article(next.get());
        ctx.framing
            .write_response_line(&next_last_ok(next.get(), id.as_str()))
            .await?;
        Ok(true)
    }
}

pub struct LastHandler;

impl CommandHandler for LastHandler {
    async fn handle<R, W>(ctx: &mut HandlerContext<'_, R, W>, args: &[String]) -> HandlerResult
    where
        R: AsyncBufRead + Unpin + Send,
        W: AsyncWrite + Unpin + Send,
    {
        if !args.is_empty() {
            ctx.framing.write_response_line(RESP_501_SYNTAX).await?;
            return Ok(true);
        }
        let Some(group) = require_group(ctx).await? else {
            return Ok(true);
        };
        let Some(current) = require_current(ctx).await? else {
            return Ok(true);
        };
        let Some(prev) = group.previous_before(current).await else {
            ctx.framing.write_response_line(RESP_422_NO_PREV_ARTICLE).await?;
            return Ok(true);
        };
        let id = group
            .get_article_numbered(prev)
            .await
            .expect("previous_before returned a registered number");
        ctx.session.set_current_article(prev.get());
        ctx.framing
            .write_response_line(&next_last_ok(prev.get(), id.as_str()))
            .await?;
        Ok(true)
    }
}

pub struct ListHandler;

impl CommandHandler for ListHandler {
    async fn handle<R, W>(ctx: &mut HandlerContext<'_, R, W>, args: &[String]) -> HandlerResult
    where
        R: AsyncBufRead + Unpin + Send,
        W: AsyncWrite + Unpin + Send,
    {
        let keyword = args.first().map(|s| s.to_ascii_uppercase());
        match keyword.as_deref().unwrap_or("ACTIVE") {
            "ACTIVE" => list_active(ctx).await,
            "NEWSGROUPS" => list_newsgroups(ctx, args.get(1).map(|s| s.as_str())).await,
            _ => {
                ctx.framing.write_response_line(RESP_503_NOT_SUPPORTED).await?;
                Ok(true)
            }
        }
    }
}

async fn list_active<R, W>(ctx: &mut HandlerContext<'_, R, W>) -> HandlerResult
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    ctx.framing.write_response_line(RESP_215_LIST_FOLLOWS).await?;
    for group in ctx.session.persistence.list_all_groups().await {
        if group.is_ignored().await {
            continue;
        }
        let metrics = group.metrics().await;
        let status = status_char(group.posting_mode().await);
        ctx.framing
            .write_data_line(
                list_active_line(group.name().as_str(), metrics.high, metrics.low, status)
                    .trim_end_matches("\r\n"),
            )
            .await?;
    }
    ctx.framing.write_dot_terminator().await?;
    Ok(true)
}

async fn list_newsgroups<R, W>(
    ctx: &mut HandlerContext<'_, R, W>,
    pattern: Option<&str>,
) -> HandlerResult
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    ctx.framing.write_response_line(RESP_215_DESCRIPTIONS).await?;
    for group in ctx.session.persistence.list_all_groups().await {
        if group.is_ignored().await {
            continue;
        }
        if let Some(pattern) = pattern {
            if !wildmat(pattern, group.name().as_str()) {
                continue;
            }
        }
        ctx.framing
            .write_data_line(
                list_newsgroups_line(group.name().as_str(), group.description())
                    .trim_end_matches("\r\n"),
            )
            .await?;
    }
    ctx.framing.write_dot_terminator().await?;
    Ok(true)
}

pub struct NewGroupsHandler;

impl CommandHandler for NewGroupsHandler {
    async fn handle<R, W>(ctx: &mut HandlerContext<'_, R, W>, args: &[String]) -> HandlerResult
    where
        R: AsyncBufRead + Unpin + Send,
        W: AsyncWrite + Unpin + Send,
    {
        if args.len() < 2 {
            ctx.framing.write_response_line(RESP_501_SYNTAX).await?;
            return Ok(true);
        }
        let gmt = args.get(2).is_some_and(|s| s.eq_ignore_ascii_case("GMT"));
        let Ok(since) = parse_datetime(&args[0], &args[1], gmt) else {
            ctx.framing.write_response_line(RESP_501_SYNTAX).await?;
            return Ok(true);
        };
        ctx.framing.write_response_line(RESP_231_NEWGROUPS).await?;
        for group in ctx.session.persistence.list_all_groups_added_since(since).await {
            if group.is_ignored().await {
                continue;
            }
            let metrics = group.metrics().await;
            let status = status_char(group.posting_mode().await);
            ctx.framing
                .write_data_line(
                    list_active_line(group.name().as_str(), metrics.high, metrics.low, status)
                        .trim_end_matches("\r\n"),
                )
                .await?;
        }
        ctx.framing.write_dot_terminator().await?;
        Ok(true)
    }
}

pub struct NewNewsHandler;

impl CommandHandler for NewNewsHandler {
    async fn handle<R, W>(ctx: &mut HandlerContext<'_, R, W>, args: &[String]) -> HandlerResult
    where
        R: AsyncBufRead + Unpin + Send,
        W: AsyncWrite + Unpin + Send,
    {
        if args.len() < 3 {
            ctx.framing.write_response_line(RESP_501_SYNTAX).await?;
            return Ok(true);
        }
        let pattern = &args[0];
        let gmt = args.get(3).is_some_and(|s| s.eq_ignore_ascii_case("GMT"));
        let Ok(since) = parse_datetime(&args[1], &args[2], gmt) else {
            ctx.framing.write_response_line(RESP_501_SYNTAX).await?;
            return Ok(true);
        };

        let mut matching_groups = Vec::new();
        for group in ctx.session.persistence.list_all_groups().await {
            if group.is_ignored().await {
                continue;
            }
            if wildmat(pattern, group.name().as_str()) {
                matching_groups.push(group);
            }
        }

        ctx.framing.write_response_line(RESP_230_NEWNEWS).await?;
        for id in ctx.session.persistence.get_article_ids_after(since).await {
            let mut matched = false;
            for group in &matching_groups {
                if group.number_of(&id).await.is_some() {
                    matched = true;
                    break;
                }
            }
            if matched {
                ctx.framing.write_data_line(id.as_str()).await?;
            }
        }
        ctx.framing.write_dot_terminator().await?;
        Ok(true)
    }
}
