//! NNTP command handlers, one module per command family.
//!
//! Per the redesign note in spec §9, dispatch is a statically-keyed
//! exhaustive match over [`CommandCode`] rather than a runtime dictionary
//! of function pointers; `handler_names()` walks the same
//! [`CommandCode::ALL`] list CAPABILITIES advertises, so the two can never
//! drift apart.

pub mod article;
pub mod ihave;
pub mod info;
pub mod list;
pub mod post;
pub mod utils;

use tokio::io::{AsyncBufRead, AsyncWrite};

use crate::commands::CommandCode;
use crate::framing::Framing;
use crate::session::ClientSession;

/// Result of a handler invocation: `Ok(true)` to keep the connection open
/// (even for negative protocol replies), `Ok(false)` only when the session
/// must terminate. `Err` propagates only for stream I/O failures.
pub type HandlerResult = anyhow::Result<bool>;

/// Everything a handler needs: the duplex framing and the session state it
/// may read or mutate.
pub struct HandlerContext<'a, R, W> {
    pub framing: &'a mut Framing<R, W>,
    pub session: &'a mut ClientSession,
}

#[allow(async_fn_in_trait)]
pub trait CommandHandler {
    async fn handle<R, W>(ctx: &mut HandlerContext<'_, R, W>, args: &[String]) -> HandlerResult
    where
        R: AsyncBufRead + Unpin + Send,
        W: AsyncWrite + Unpin + Send;
}

/// The verb names CAPABILITIES advertises, in registration order.
pub fn handler_names() -> Vec<&'static str> {
    CommandCode::ALL.iter().map(|c| c.verb()).collect()
}

/// Dispatches one already-tokenized request to its handler.
pub async fn dispatch<R, W>(
    code: CommandCode,
    ctx: &mut HandlerContext<'_, R, W>,
    args: &[String],
) -> HandlerResult
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    use article::{ArticleOperation, OverHandler};
    use CommandCode::*;

    match code {
        Article => article::handle_article_operation(ctx, args, ArticleOperation::Article).await,
        Head => article::handle_article_operation(ctx, args, ArticleOperation::Head).await,
        Body => article::handle_article_operation(ctx, args, ArticleOperation::Body).await,
        Stat => article::handle_article_operation(ctx, args, ArticleOperation::Stat).await,
        Over | Xover => OverHandler::handle(ctx, args).await,

        Group => list::GroupHandler::handle(ctx, args).await,
        Listgroup => list::ListGroupHandler::handle(ctx, args).await,
        List => list::ListHandler::handle(ctx, args).await,
        Newgroups => list::NewGroupsHandler::handle(ctx, args).await,
        Newnews => list::NewNewsHandler::handle(ctx, args).await,
        Next => list::NextHandler::handle(ctx, args).await,
        Last => list::LastHandler::handle(ctx, args).await,

        Post => post::PostHandler::handle(ctx, args).await,
        Ihave => ihave::IhaveHandler::handle(ctx, args).await,

        Date => info::DateHandler::handle(ctx, args).await,
        Help => info::HelpHandler::handle(ctx, args).await,
        Mode => info::ModeHandler::handle(ctx, args).await,
        Capabilities => info::CapabilitiesHandler::handle(ctx, args).await,
        Quit => info::QuitHandler::handle(ctx, args).await,
    }
}
