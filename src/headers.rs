//! Article header storage.
//!
//! Headers are kept in an ordered, case-insensitively-keyed multimap rather
//! than a plain `HashMap<String, String>`: several standard headers
//! (`Newsgroups`, `References`) carry more than one logical value, and the
//! wire order of headers matters for re-emission.

use smallvec::SmallVec;

/// Headers required for a well-formed posted/transferred article.
pub const REQUIRED_HEADERS: &[&str] = &["Message-ID", "Newsgroups", "Subject", "From", "Date", "Path"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidArticleHeaders {
    pub missing: Vec<&'static str>,
}

impl std::fmt::Display for InvalidArticleHeaders {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "missing required headers: {}", self.missing.join(", "))
    }
}

impl std::error::Error for InvalidArticleHeaders {}

/// An ordered multimap of header name to one-or-more values, keyed
/// case-insensitively. Canonical casing is whatever the first occurrence of
/// a name used.
#[derive(Debug, Clone, Default)]
pub struct ArticleHeaders {
    entries: Vec<(String, SmallVec<[String; 1]>)>,
}

impl ArticleHeaders {
    pub fn new() -> Self {
        ArticleHeaders::default()
    }

    fn find(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|(k, _)| k.eq_ignore_ascii_case(name))
    }

    /// Appends a value under `name`, creating the entry if this is the
    /// first occurrence (in which case `name`'s casing becomes canonical).
    pub fn push(&mut self, name: &str, value: impl Into<String>) {
        match self.find(name) {
            Some(i) => self.entries[i].1.push(value.into()),
            None => self
                .entries
                .push((name.to_string(), SmallVec::from_elem(value.into(), 1))),
        }
    }

    /// The first value stored under `name`, if any.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.find(name)
            .and_then(|i| self.entries[i].1.first())
            .map(|s| s.as_str())
    }

    /// All values stored under `name`, in insertion order.
    pub fn get_all(&self, name: &str) -> &[String] {
        self.find(name)
            .map(|i| self.entries[i].1.as_slice())
            .unwrap_or(&[])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Iterates entries in wire order: `(canonical name, values)`.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// `Newsgroups` header split into individual group names (comma
    /// separated, whitespace trimmed). Reads every stored value under the
    /// name, not just the first: `parse_block` already splits a
    /// comma-joined `Newsgroups` line into one value per group, so a
    /// cross-posted article has several entries here, and each of those is
    /// itself split on `,` in case a caller constructed the headers by
    /// pushing one raw comma-joined value directly.
    pub fn newsgroups(&self) -> Vec<String> {
        self.get_all("Newsgroups")
            .iter()
            .flat_map(|v| v.split(','))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// `References` header split on whitespace, preserving order.
    pub fn references(&self) -> Vec<String> {
        self.get("References")
            .map(|v| v.split_whitespace().map(|s| s.to_string()).collect())
            .unwrap_or_default()
    }

    /// Validates that every entry in [`REQUIRED_HEADERS`] is present.
    pub fn validate_required(&self) -> Result<(), InvalidArticleHeaders> {
        let missing: Vec<&'static str> = REQUIRED_HEADERS
            .iter()
            .copied()
            .filter(|name| !self.contains(name))
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(InvalidArticleHeaders { missing })
        }
    }

    /// Parses a block of `Name: value` lines (already un-stuffed, CRLF- or
    /// LF-delimited, no leading/trailing blank line). Folded continuation
    /// lines (lines beginning with whitespace) are discarded rather than
    /// concatenated onto the previous header, matching the convention this
    /// crate mirrors from its source system. `Lines` and `Bytes` headers are
    /// dropped: they are derived values the engine recomputes on emission.
    pub fn parse_block(block: &str) -> Result<Self, String> {
        let mut headers = ArticleHeaders::new();
        for line in block.split("\r\n").flat_map(|l| l.split('\n')) {
            if line.is_empty() {
                continue;
            }
            if line.starts_with(' ') || line.starts_with('\t') {
                // folded continuation: discarded, not concatenated.
                continue;
            }
            let (name, value) = line
                .split_once(':')
                .ok_or_else(|| format!("malformed header line: {line:?}"))?;
            let name = name.trim();
            if name.is_empty() {
                return Err(format!("malformed header line: {line:?}"));
            }
            let value = value.trim();
            if name.eq_ignore_ascii_case("Lines") || name.eq_ignore_ascii_case("Bytes") {
                continue;
            }
            if name.eq_ignore_ascii_case("Newsgroups") || name.eq_ignore_ascii_case("References") {
                for part in value.split(',') {
                    let part = part.trim();
                    if !part.is_empty() {
                        headers.push(name, part);
                    }
                }
            } else {
                headers.push(name, value);
            }
        }
        Ok(headers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_preserves_first_casing() {
        let mut h = ArticleHeaders::new();
        h.push("Subject", "hello");
        h.push("subject", "world");
        assert_eq!(h.get_all("SUBJECT"), &["hello".to_string(), "world".to_string()]);
        assert_eq!(h.iter().next().unwrap().0, "Subject");
    }

    #[test]
    fn newsgroups_comma_split() {
        let mut h = ArticleHeaders::new();
        h.push("Newsgroups", "a.b, c.d ,e.f");
        assert_eq!(h.newsgroups(), vec!["a.b", "c.d", "e.f"]);
    }

    #[test]
    fn references_whitespace_split() {
        let mut h = ArticleHeaders::new();
        h.push("References", "<a@b> <c@d>");
        assert_eq!(h.references(), vec!["<a@b>", "<c@d>"]);
    }

    #[test]
    fn validate_required_reports_missing() {
        let h = ArticleHeaders::new();
        let err = h.validate_required().unwrap_err();
        assert!(err.missing.contains(&"Message-ID"));
    }

    #[test]
    fn parse_block_discards_folded_continuation() {
        let block = "Subject: hello\r\n world\r\nFrom: a@b\r\n";
        let h = ArticleHeaders::parse_block(block).unwrap();
        assert_eq!(h.get("Subject"), Some("hello"));
        assert_eq!(h.get("From"), Some("a@b"));
    }

    #[test]
    fn parse_block_drops_lines_and_bytes() {
        let block = "Subject: hi\r\nLines: 3\r\nBytes: 120\r\n";
        let h = ArticleHeaders::parse_block(block).unwrap();
        assert!(!h.contains("Lines"));
        assert!(!h.contains("Bytes"));
    }

    #[test]
    fn parse_block_rejects_malformed_line() {
        assert!(ArticleHeaders::parse_block("notaheader\r\n").is_err());
    }
}
