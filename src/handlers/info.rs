//! DATE, HELP, MODE, CAPABILITIES, QUIT.

use chrono::Utc;
use tokio::io::{AsyncBufRead, AsyncWrite};

use crate::handlers::{handler_names, CommandHandler, HandlerContext, HandlerResult};
use crate::responses::*;

pub struct DateHandler;

impl CommandHandler for DateHandler {
    async fn handle<R, W>(ctx: &mut HandlerContext<'_, R, W>, args: &[String]) -> HandlerResult
    where
        R: AsyncBufRead + Unpin + Send,
        W: AsyncWrite + Unpin + Send,
    {
        if !args.is_empty() {
            ctx.framing.write_response_line(RESP_501_SYNTAX).await?;
            return Ok(true);
        }
        let stamp = Utc::now().format("%Y%m%d%H%M%S").to_string();
        ctx.framing.write_response_line(&date_line(&stamp)).await?;
        Ok(true)
    }
}

pub struct HelpHandler;

impl CommandHandler for HelpHandler {
    async fn handle<R, W>(ctx: &mut HandlerContext<'_, R, W>, args: &[String]) -> HandlerResult
    where
        R: AsyncBufRead + Unpin + Send,
        W: AsyncWrite + Unpin + Send,
    {
        if !args.is_empty() {
            ctx.framing.write_response_line(RESP_501_SYNTAX).await?;
            return Ok(true);
        }
        ctx.framing.write_response_line(RESP_100_HELP_FOLLOWS).await?;
        for line in RESP_HELP_TEXT.split("\r\n").filter(|l| !l.is_empty()) {
            ctx.framing.write_data_line(line).await?;
        }
        ctx.framing.write_dot_terminator().await?;
        Ok(true)
    }
}

pub struct ModeHandler;

impl CommandHandler for ModeHandler {
    async fn handle<R, W>(ctx: &mut HandlerContext<'_, R, W>, args: &[String]) -> HandlerResult
    where
        R: AsyncBufRead + Unpin + Send,
        W: AsyncWrite + Unpin + Send,
    {
        if args.len() != 1 || !args[0].eq_ignore_ascii_case("READER") {
            ctx.framing.write_response_line(RESP_501_SYNTAX).await?;
            return Ok(true);
        }
        let subject = ctx.session.subject().map(|s| s.to_string());
        let posting_allowed = ctx
            .session
            .policy
            .is_posting_allowed(subject.as_deref())
            .await;
        ctx.framing
            .write_response_line(&mode_reader_line(posting_allowed))
            .await?;
        Ok(true)
    }
}

pub struct CapabilitiesHandler;

impl CommandHandler for CapabilitiesHandler {
    async fn handle<R, W>(ctx: &mut HandlerContext<'_, R, W>, args: &[String]) -> HandlerResult
    where
        R: AsyncBufRead + Unpin + Send,
        W: AsyncWrite + Unpin + Send,
    {
        if !args.is_empty() {
            ctx.framing.write_response_line(RESP_501_SYNTAX).await?;
            return Ok(true);
        }
        ctx.framing.write_response_line(RESP_101_CAPABILITIES).await?;
        ctx.framing.write_data_line(RESP_CAP_VERSION).await?;
        for name in handler_names() {
            ctx.framing.write_data_line(name).await?;
        }
        ctx.framing.write_dot_terminator().await?;
        Ok(true)
    }
}

pub struct QuitHandler;

impl CommandHandler for QuitHandler {
    async fn handle<R, W>(ctx: &mut HandlerContext<'_, R, W>, args: &[String]) -> HandlerResult
    where
        R: AsyncBufRead + Unpin + Send,
        W: AsyncWrite + Unpin + Send,
    {
        if !args.is_empty() {
            ctx.framing.write_response_line(RESP_501_SYNTAX).await?;
            return Ok(true);
        }
        ctx.framing.write_response_line(RESP_205_CLOSING).await?;
        Ok(false)
    }
}
