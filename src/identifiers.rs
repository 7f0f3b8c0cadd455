//! Value types for the identifiers the protocol passes around: message-ids,
//! newsgroup names, article numbers, and the metrics snapshot of a group.
//!
//! Construction is fallible and yields a plain `Result`, never a panic —
//! callers at the handler boundary map a rejection to the right numeric
//! reply instead of unwinding (see `ProtocolFault`).

use std::fmt;

/// Opaque article identifier, e.g. `<part1@host>`.
///
/// Stored including the angle brackets; equality and hashing operate on
/// that literal bracketed form, matching RFC 3977's comparison rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MessageId(String);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidMessageId(pub String);

impl fmt::Display for InvalidMessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid message-id: {:?}", self.0)
    }
}

impl std::error::Error for InvalidMessageId {}

impl MessageId {
    /// Parses a message-id from its literal bracketed wire form,
    /// e.g. `<abc@example.com>`.
    pub fn parse(raw: &str) -> Result<Self, InvalidMessageId> {
        if !raw.starts_with('<') || !raw.ends_with('>') || raw.len() < 3 {
            return Err(InvalidMessageId(raw.to_string()));
        }
        let inner = &raw[1..raw.len() - 1];
        if inner.is_empty() || inner.contains(['<', '>', ' ', '\t', '\r', '\n']) {
            return Err(InvalidMessageId(raw.to_string()));
        }
        Ok(MessageId(raw.to_string()))
    }

    /// Looks like a message-id (starts with `<`) without fully validating it.
    /// Used by handlers to decide which of the two `ARTICLE`/`OVER` argument
    /// forms they were given.
    pub fn looks_like(raw: &str) -> bool {
        raw.starts_with('<')
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A dotted hierarchical newsgroup name, e.g. `comp.lang.rust`.
///
/// Case-preserving on construction; compared and hashed case-insensitively
/// (ASCII) so it can key a lookup map without normalizing at every call
/// site.
#[derive(Debug, Clone)]
pub struct NewsgroupName(String);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidNewsgroupName(pub String);

impl fmt::Display for InvalidNewsgroupName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid newsgroup name: {:?}", self.0)
    }
}

impl std::error::Error for InvalidNewsgroupName {}

impl NewsgroupName {
    pub fn parse(raw: &str) -> Result<Self, InvalidNewsgroupName> {
        if raw.is_empty() {
            return Err(InvalidNewsgroupName(raw.to_string()));
        }
        let valid = raw.split('.').all(|component| {
            !component.is_empty()
                && component
                    .bytes()
                    .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'+' | b'-' | b'_'))
        });
        if !valid {
            return Err(InvalidNewsgroupName(raw.to_string()));
        }
        Ok(NewsgroupName(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NewsgroupName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq for NewsgroupName {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}
impl Eq for NewsgroupName {}

impl std::hash::Hash for NewsgroupName {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        for b in self.0.bytes() {
            b.to_ascii_lowercase().hash(state);
        }
    }
}

/// A 1-based article number within a newsgroup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ArticleNumber(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidArticleNumber;

impl fmt::Display for InvalidArticleNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("article number must be >= 1")
    }
}

impl std::error::Error for InvalidArticleNumber {}

impl ArticleNumber {
    pub fn new(n: u64) -> Result<Self, InvalidArticleNumber> {
        if n == 0 {
            return Err(InvalidArticleNumber);
        }
        Ok(ArticleNumber(n))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ArticleNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Snapshot of a newsgroup's article range, computed fresh on each call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewsgroupMetrics {
    pub count: u64,
    pub low: u64,
    pub high: i64,
}

impl NewsgroupMetrics {
    pub const LOW_WHEN_EMPTY: u64 = 0;
    pub const HIGH_WHEN_EMPTY: i64 = -1;

    pub fn empty() -> Self {
        NewsgroupMetrics {
            count: 0,
            low: Self::LOW_WHEN_EMPTY,
            high: Self::HIGH_WHEN_EMPTY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_id_round_trip() {
        let id = MessageId::parse("<a@b>").unwrap();
        assert_eq!(id.as_str(), "<a@b>");
        assert_eq!(id, MessageId::parse("<a@b>").unwrap());
    }

    #[test]
    fn message_id_rejects_missing_brackets() {
        assert!(MessageId::parse("a@b").is_err());
        assert!(MessageId::parse("<a b>").is_err());
        assert!(MessageId::parse("<>").is_err());
    }

    #[test]
    fn newsgroup_name_case_insensitive_eq() {
        let a = NewsgroupName::parse("Comp.Lang.Rust").unwrap();
        let b = NewsgroupName::parse("comp.lang.rust").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "Comp.Lang.Rust");
    }

    #[test]
    fn newsgroup_name_rejects_empty_components() {
        assert!(NewsgroupName::parse("comp..rust").is_err());
        assert!(NewsgroupName::parse("").is_err());
        assert!(NewsgroupName::parse("comp/rust").is_err());
    }

    #[test]
    fn article_number_rejects_zero() {
        assert!(ArticleNumber::new(0).is_err());
        assert_eq!(ArticleNumber::new(5).unwrap().get(), 5);
    }

    #[test]
    fn metrics_empty_sentinel() {
        let m = NewsgroupMetrics::empty();
        assert_eq!(m.low, 0);
        assert_eq!(m.high, -1);
    }
}
