//! Line-oriented duplex I/O: CRLF framing, dot-stuffing, dot-line
//! termination.
//!
//! The teacher's `ProtocolStreams` hierarchy subclassed a framing base for
//! client and peer sides; per the redesign note in spec §9 this is instead
//! a single value type that owns both halves of the connection and is
//! composed into, rather than extended by, anything peer-specific.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

/// Duplex line framing over a buffered reader half and a writer half.
/// Generic over the concrete stream types so the engine can run it either
/// over a real `TcpStream` split or an in-memory `tokio::io::duplex` pair in
/// tests.
pub struct Framing<R, W> {
    reader: R,
    writer: W,
}

impl<R: AsyncBufRead + Unpin, W: AsyncWrite + Unpin> Framing<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Framing { reader, writer }
    }

    /// Reads the next logical line, stripped of its trailing CRLF (or bare
    /// LF). Returns an empty string at end-of-stream.
    pub async fn read_line(&mut self) -> std::io::Result<String> {
        let (line, _eof) = self.read_line_raw().await?;
        Ok(line)
    }

    /// Like `read_line`, but also reports whether the stream was already at
    /// end-of-file (as opposed to having just read a genuinely blank line).
    /// The engine's top-level loop needs this distinction to tell a closed
    /// connection apart from a client sending an empty command line.
    pub async fn read_line_eof(&mut self) -> std::io::Result<(String, bool)> {
        self.read_line_raw().await
    }

    async fn read_line_raw(&mut self) -> std::io::Result<(String, bool)> {
        let mut buf = String::new();
        let n = self.reader.read_line(&mut buf).await?;
        if n == 0 {
            return Ok((String::new(), true));
        }
        while buf.ends_with('\n') || buf.ends_with('\r') {
            buf.pop();
        }
        Ok((buf, false))
    }

    /// Reads lines until a lone `.` line, un-stuffing (`..` → `.`) any line
    /// that starts with a dot along the way. Returns the payload joined by
    /// `\r\n`, without the terminating dot line. End-of-stream before the
    /// terminator is treated as an I/O error: the caller never sees a
    /// truncated body silently. A line that starts with a single `.` but is
    /// neither the dot terminator nor a properly-stuffed `..` line violates
    /// the stuffing convention and is a protocol error (§4.1): the
    /// connection must be treated as terminal rather than guessing at what
    /// the sender meant.
    pub async fn read_until_dot(&mut self) -> std::io::Result<String> {
        let mut out = String::new();
        loop {
            let (line, eof) = self.read_line_raw().await?;
            if eof {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::UnexpectedEof,
                    "stream closed before dot terminator",
                ));
            }
            if line == "." {
                break;
            }
            let unstuffed = if line.starts_with("..") {
                &line[1..]
            } else if line.starts_with('.') {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    "malformed dot-stuffing",
                ));
            } else {
                line.as_str()
            };
            if !out.is_empty() {
                out.push_str("\r\n");
            }
            out.push_str(unstuffed);
        }
        Ok(out)
    }

    /// Writes a response line: `code text\r\n`, flushing immediately so the
    /// client observes replies in request order.
    pub async fn write_response_line(&mut self, line: &str) -> std::io::Result<()> {
        self.writer.write_all(line.as_bytes()).await?;
        self.writer.flush().await
    }

    /// Writes one payload line of a multi-line body, stuffing a leading dot
    /// if present. Used for POST/IHAVE replay; OVER lines and listings never
    /// carry a leading dot so never need stuffing in practice, but calling
    /// this for them is harmless.
    pub async fn write_data_line(&mut self, line: &str) -> std::io::Result<()> {
        if let Some(rest) = line.strip_prefix('.') {
            self.writer.write_all(b".").await?;
            self.writer.write_all(rest.as_bytes()).await?;
        } else {
            self.writer.write_all(line.as_bytes()).await?;
        }
        self.writer.write_all(b"\r\n").await
    }

    /// Writes one line of an article body that is already stored in wire
    /// transmission form (i.e. already dot-stuffed at storage time, per the
    /// storage convention preserved from this crate's source system — see
    /// §9). Unlike `write_data_line`, this never re-stuffs: doing so would
    /// double the leading dot.
    pub async fn write_verbatim_line(&mut self, line: &str) -> std::io::Result<()> {
        self.writer.write_all(line.as_bytes()).await?;
        self.writer.write_all(b"\r\n").await
    }

    /// Writes `.\r\n` and flushes, ending a multi-line reply.
    pub async fn write_dot_terminator(&mut self) -> std::io::Result<()> {
        self.writer.write_all(b".\r\n").await?;
        self.writer.flush().await
    }

    pub async fn flush(&mut self) -> std::io::Result<()> {
        self.writer.flush().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::BufReader;

    async fn framing_over(input: &str) -> (Framing<BufReader<&[u8]>, Vec<u8>>, ) {
        (Framing::new(BufReader::new(input.as_bytes()), Vec::new()),)
    }

    #[tokio::test]
    async fn read_line_strips_crlf() {
        let (mut f,) = framing_over("hello\r\nworld\n").await;
        assert_eq!(f.read_line().await.unwrap(), "hello");
        assert_eq!(f.read_line().await.unwrap(), "world");
        assert_eq!(f.read_line().await.unwrap(), "");
    }

    #[tokio::test]
    async fn read_until_dot_unstuffs_leading_dots() {
        let (mut f,) = framing_over("line one\r\n..dotted\r\nline two\r\n.\r\n").await;
        let body = f.read_until_dot().await.unwrap();
        assert_eq!(body, "line one\r\n.dotted\r\nline two");
    }

    #[tokio::test]
    async fn read_until_dot_rejects_unstuffed_leading_dot() {
        let (mut f,) = framing_over("line one\r\n.oops\r\nline two\r\n.\r\n").await;
        assert!(f.read_until_dot().await.is_err());
    }

    #[tokio::test]
    async fn write_data_line_stuffs_leading_dot() {
        let mut f = Framing::new(BufReader::new(&b""[..]), Vec::new());
        f.write_data_line(".oops").await.unwrap();
        assert_eq!(f.writer, b"..oops\r\n");
    }

    #[tokio::test]
    async fn write_dot_terminator_is_exact() {
        let mut f = Framing::new(BufReader::new(&b""[..]), Vec::new());
        f.write_dot_terminator().await.unwrap();
        assert_eq!(f.writer, b".\r\n");
    }
}
