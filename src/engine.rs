//! The per-connection protocol engine: greeting, startup bootstrap, and the
//! read/dispatch/commit loop (§4.3).

use std::time::Duration;

use chrono::Utc;
use tokio::io::{AsyncBufRead, AsyncWrite};
use tracing::{debug, error};

use crate::collaborators::persistence::{Article, PostingMode};
use crate::collaborators::{DynIdentity, DynPersistence, DynPolicy};
use crate::commands::CommandCode;
use crate::config::{PRODUCT_NAME, PRODUCT_VERSION};
use crate::framing::Framing;
use crate::handlers::{self, HandlerContext};
use crate::headers::ArticleHeaders;
use crate::identifiers::NewsgroupName;
use crate::responses::{greeting_line, RESP_500_UNKNOWN_COMMAND};
use crate::session::ClientSession;

/// Runs one NNTP session to completion over `framing`. Returns once the
/// connection has ended, either by `QUIT`, by the stream closing, or by
/// `idle_timeout` elapsing with no request line read (logged and treated as
/// a graceful close, same as EOF). Pass `None` for a timeout-agnostic run
/// (used by the crate's own tests).
#[tracing::instrument(skip(framing, persistence, identity, policy))]
pub async fn run<R, W>(
    framing: &mut Framing<R, W>,
    persistence: DynPersistence,
    identity: DynIdentity,
    policy: DynPolicy,
    server_label: &str,
    idle_timeout: Option<Duration>,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    bootstrap_log_group(&persistence, &identity, server_label).await;

    let mut session = ClientSession::new(persistence, identity, policy);

    let posting_allowed = session
        .policy
        .is_posting_allowed(session.subject())
        .await;
    framing
        .write_response_line(&greeting_line(
            posting_allowed,
            PRODUCT_NAME,
            PRODUCT_VERSION,
        ))
        .await?;

    loop {
        framing.flush().await?;
        session.persistence.commit().await;

        let (line, eof) = match idle_timeout {
            Some(timeout) => match tokio::time::timeout(timeout, framing.read_line_eof()).await {
                Ok(result) => result?,
                Err(_) => {
                    debug!("idle timeout elapsed, closing connection");
                    break;
                }
            },
            None => framing.read_line_eof().await?,
        };
        if eof {
            break;
        }

        if line.trim().is_empty() {
            continue;
        }
        let Ok((_, command)) = crate::parse::parse_command(&line) else {
            framing.write_response_line(RESP_500_UNKNOWN_COMMAND).await?;
            break;
        };
        let verb = command.name;
        let args = command.args;

        let Some(code) = CommandCode::from_verb(&verb) else {
            framing.write_response_line(RESP_500_UNKNOWN_COMMAND).await?;
            break;
        };

        debug!(command = %verb, "dispatching");
        session.request_args = args.clone();

        let mut ctx = HandlerContext {
            framing,
            session: &mut session,
        };
        let keep_going = match handlers::dispatch(code, &mut ctx, &args).await {
            Ok(keep_going) => keep_going,
            Err(err) => {
                // §4.3 step 4: any unhandled exception replies 500 and ends
                // the session, using the fault's own code if it carries one.
                let code = err
                    .downcast_ref::<crate::error::ProtocolFault>()
                    .map(|fault| fault.response_code())
                    .unwrap_or(500);
                error!(%err, code, "unhandled exception, closing connection");
                let _ = framing
                    .write_response_line(&format!("{code} internal server error\r\n"))
                    .await;
                false
            }
        };

        if code == CommandCode::Quit || !keep_going {
            break;
        }
    }

    session.persistence.commit().await;
    session.persistence.close().await;
    framing.flush().await?;
    Ok(())
}

/// §6.5: ensures `local.nntp.<server>.log` exists and appends exactly one
/// startup article to it, raising its posting mode only for the instant of
/// that one append.
async fn bootstrap_log_group(
    persistence: &DynPersistence,
    identity: &DynIdentity,
    server_label: &str,
) {
    let group_name = format!("local.nntp.{server_label}.log");
    let name = match NewsgroupName::parse(&group_name) {
        Ok(name) => name,
        Err(_) => return,
    };

    let group = match persistence.get_group_by_name(&name).await {
        Some(g) => g,
        None => {
            persistence
                .add_group(
                    name,
                    "Server activity log".to_string(),
                    PostingMode::Prohibited,
                )
                .await
        }
    };

    let now = Utc::now();
    let date = now.to_rfc2822();
    let host = identity.host_identifier().to_string();

    let mut headers = ArticleHeaders::new();
    headers.push("Newsgroups", group_name);
    headers.push("Subject", "Server activity log");
    headers.push("From", server_label);
    headers.push("Date", &date);
    headers.push("Path", format!("{host}!not-for-email"));
    let id = identity.create_message_id(&headers).await;
    headers.push("Message-ID", id.as_str());

    let body = format!("Server started at {date}\n");

    group.set_posting_mode(PostingMode::Allowed).await;
    persistence
        .store_article(Article {
            id: id.clone(),
            headers,
            body,
        })
        .await;
    group.include_article(id).await;
    group.set_posting_mode(PostingMode::Prohibited).await;
}
