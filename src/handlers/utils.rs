//! Helpers shared by several command handlers: required-selected-group and
//! required-current-article checks, and the overview-line formatter used by
//! both OVER and NEWNEWS.

use tokio::io::{AsyncBufRead, AsyncWrite};

use crate::collaborators::DynNewsgroup;
use crate::collaborators::persistence::Article;
use crate::handlers::HandlerContext;
use crate::headers::ArticleHeaders;
use crate::responses::{RESP_412_NO_GROUP_SELECTED, RESP_420_NO_CURRENT_ARTICLE};

/// Replies 412 and signals "already handled" if no group is selected.
pub async fn require_group<R, W>(
    ctx: &mut HandlerContext<'_, R, W>,
) -> std::io::Result<Option<DynNewsgroup>>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    match ctx.session.selected_group() {
        Some(g) => Ok(Some(g.clone())),
        None => {
            ctx.framing
                .write_response_line(RESP_412_NO_GROUP_SELECTED)
                .await?;
            Ok(None)
        }
    }
}

/// Replies 420 and signals "already handled" if there is no current
/// article cursor.
pub async fn require_current<R, W>(
    ctx: &mut HandlerContext<'_, R, W>,
) -> std::io::Result<Option<u64>>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    match ctx.session.current_article() {
        Some(n) => Ok(Some(n)),
        None => {
            ctx.framing
                .write_response_line(RESP_420_NO_CURRENT_ARTICLE)
                .await?;
            Ok(None)
        }
    }
}

/// Replaces CR, LF and TAB with a single space, as §4.4 requires for every
/// overview field.
fn sanitize_field(value: &str) -> String {
    value
        .chars()
        .map(|c| match c {
            '\r' | '\n' | '\t' => ' ',
            other => other,
        })
        .collect()
}

/// Builds one tab-separated overview line: `number subject from date
/// message-id references bytes lines`. Missing fields are emitted empty;
/// `bytes`/`lines` are derived from the stored body rather than read back
/// from the (discarded) `Bytes`/`Lines` headers.
pub fn overview_line(number: u64, article: &Article) -> String {
    let subject = sanitize_field(article.headers.get("Subject").unwrap_or(""));
    let from = sanitize_field(article.headers.get("From").unwrap_or(""));
    let date = sanitize_field(article.headers.get("Date").unwrap_or(""));
    let message_id = sanitize_field(article.id.as_str());
    let references = sanitize_field(&article.headers.references().join(" "));
    let bytes = article.body.len();
    let lines = article.body.lines().count();
    format!(
        "{number}\t{subject}\t{from}\t{date}\t{message_id}\t{references}\t{bytes}\t{lines}\r\n"
    )
}

/// Re-stuffs a body that `Framing::read_until_dot` has already un-stuffed,
/// restoring the §9 storage convention that article bodies are kept in
/// wire/transmission form so ARTICLE/HEAD/BODY can re-emit them verbatim
/// via `Framing::write_verbatim_line` without re-stuffing at emit time.
fn stuff_body(body: &str) -> String {
    body.split("\r\n")
        .map(|line| {
            if line.starts_with('.') {
                format!(".{line}")
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\r\n")
}

/// Splits a received payload (already un-stuffed by `Framing::read_until_dot`)
/// at the blank line separating headers from body, parses the header block,
/// and validates the required-header set. Returns `None` on any failure —
/// callers pick the reply code that applies to their command (POST → 441,
/// IHAVE → 437). The returned body is re-stuffed before storage; see
/// `stuff_body`.
pub fn parse_and_validate_body(raw: &str) -> Option<(ArticleHeaders, String)> {
    let split_at = raw.find("\r\n\r\n")?;
    let header_block = &raw[..split_at + 2];
    let body = &raw[split_at + 4..];
    if body.is_empty() {
        return None;
    }
    let headers = ArticleHeaders::parse_block(header_block).ok()?;
    headers.validate_required().ok()?;
    Some((headers, stuff_body(body)))
}
