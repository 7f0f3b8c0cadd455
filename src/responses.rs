//! Response code constants and canonical text for the commands this crate
//! implements (§6.2). Lines that carry no variable data are plain `&str`
//! constants in the teacher's style; lines that need interpolation (group
//! name, counts, message-ids…) are built by small formatting helpers next to
//! the constant they extend, rather than baked in as `format!` calls spread
//! across every handler.

pub const RESP_CRLF: &str = "\r\n";
pub const RESP_DOT_CRLF: &str = ".\r\n";

pub const RESP_200_POSTING_ALLOWED: &str = "200";
pub const RESP_201_POSTING_PROHIBITED: &str = "201";
pub const RESP_205_CLOSING: &str = "205 closing connection\r\n";

pub const RESP_211_GROUP: &str = "211";
pub const RESP_211_LISTGROUP: &str = "211";
pub const RESP_215_LIST_FOLLOWS: &str = "215 list of newsgroups follows\r\n";
pub const RESP_215_DESCRIPTIONS: &str = "215 descriptions follow\r\n";

pub const RESP_220_ARTICLE: &str = "220";
pub const RESP_221_HEAD: &str = "221";
pub const RESP_222_BODY: &str = "222";
pub const RESP_223_STAT: &str = "223";
pub const RESP_224_OVERVIEW: &str = "224 Overview information follows\r\n";

pub const RESP_230_NEWNEWS: &str = "230 list of new articles follows\r\n";
pub const RESP_231_NEWGROUPS: &str = "231 list of new newsgroups follows\r\n";

pub const RESP_235_TRANSFER_OK: &str = "235 article transferred ok\r\n";
pub const RESP_240_ARTICLE_RECEIVED: &str = "240 article received ok\r\n";

pub const RESP_335_SEND_IT: &str = "335 send article to be transferred; end with <CR-LF>.<CR-LF>\r\n";
pub const RESP_340_SEND_ARTICLE: &str = "340 send article to be posted; end with <CR-LF>.<CR-LF>\r\n";

pub const RESP_403_INTERNAL: &str = "403 internal fault\r\n";

pub const RESP_411_NO_SUCH_GROUP: &str = "411 no such newsgroup\r\n";
pub const RESP_412_NO_GROUP_SELECTED: &str = "412 no newsgroup selected\r\n";
pub const RESP_420_NO_CURRENT_ARTICLE: &str = "420 no current article\r\n";
pub const RESP_421_NO_NEXT_ARTICLE: &str = "421 no next article in this group\r\n";
pub const RESP_422_NO_PREV_ARTICLE: &str = "422 no previous article in this group\r\n";
pub const RESP_423_NO_ARTICLE_IN_RANGE: &str = "423 no articles in that range\r\n";
pub const RESP_423_NO_SUCH_ARTICLE_NUMBER: &str = "423 no such article number in this group\r\n";
pub const RESP_430_NO_SUCH_ARTICLE: &str = "430 no such article\r\n";
pub const RESP_435_NOT_WANTED: &str = "435 article not wanted\r\n";
pub const RESP_436_TRANSFER_FAILED: &str = "436 transfer failed\r\n";
pub const RESP_437_TRANSFER_REJECTED: &str = "437 transfer rejected\r\n";
pub const RESP_440_POSTING_NOT_PERMITTED: &str = "440 posting not permitted\r\n";
pub const RESP_441_POSTING_FAILED: &str = "441 posting failed\r\n";

pub const RESP_500_UNKNOWN_COMMAND: &str = "500 command not recognized\r\n";
pub const RESP_501_SYNTAX: &str = "501 syntax error\r\n";
pub const RESP_503_NOT_SUPPORTED: &str = "503 feature not supported\r\n";

pub const RESP_100_HELP_FOLLOWS: &str = "100 help text follows\r\n";
pub const RESP_101_CAPABILITIES: &str = "101 capability list follows\r\n";
pub const RESP_111_DATE: &str = "111";

pub const RESP_CAP_VERSION: &str = "VERSION 2";
pub const RESP_CAP_READER: &str = "READER";
pub const RESP_CAP_IHAVE: &str = "IHAVE";
pub const RESP_CAP_POST: &str = "POST";
pub const RESP_CAP_NEWNEWS: &str = "NEWNEWS";
pub const RESP_CAP_HDR: &str = "HDR";
pub const RESP_CAP_OVER: &str = "OVER MSGID";
pub const RESP_CAP_LIST: &str = "LIST ACTIVE NEWSGROUPS";

pub const RESP_HELP_TEXT: &str = concat!(
    "CAPABILITIES\r\n",
    "MODE READER\r\n",
    "GROUP\r\n",
    "LIST\r\n",
    "LISTGROUP\r\n",
    "ARTICLE\r\n",
    "HEAD\r\n",
    "BODY\r\n",
    "STAT\r\n",
    "OVER\r\n",
    "XOVER\r\n",
    "NEXT\r\n",
    "LAST\r\n",
    "NEWGROUPS\r\n",
    "NEWNEWS\r\n",
    "IHAVE\r\n",
    "POST\r\n",
    "DATE\r\n",
    "HELP\r\n",
    "QUIT\r\n"
);

/// `211 count low high name\r\n` — GROUP and LISTGROUP's opening line.
pub fn group_selected(count: u64, low: u64, high: i64, name: &str) -> String {
    format!("211 {count} {low} {high} {name}\r\n")
}

/// `220/221/222/223 number message-id\r\n` — the shared ARTICLE/HEAD/BODY/STAT
/// status line.
pub fn article_status(code: &str, number: u64, message_id: &str) -> String {
    format!("{code} {number} {message_id}\r\n")
}

/// `223 number message-id\r\n` — NEXT/LAST success line (reuses the ARTICLE
/// status line's shape but is spelled out separately since its caller never
/// has a `code` variable in hand).
pub fn next_last_ok(number: u64, message_id: &str) -> String {
    format!("223 {number} {message_id}\r\n")
}

/// One `LIST ACTIVE` data line: `name high low status\r\n`.
pub fn list_active_line(name: &str, high: i64, low: u64, status: char) -> String {
    format!("{name} {high} {low} {status}\r\n")
}

/// One `LIST NEWSGROUPS` data line: `name<TAB>description\r\n`.
pub fn list_newsgroups_line(name: &str, description: &str) -> String {
    format!("{name}\t{description}\r\n")
}

/// The greeting line: `200/201 product version\r\n`.
pub fn greeting_line(posting_allowed: bool, product: &str, version: &str) -> String {
    let code = if posting_allowed {
        RESP_200_POSTING_ALLOWED
    } else {
        RESP_201_POSTING_PROHIBITED
    };
    format!("{code} {product} {version}\r\n")
}

/// MODE READER's reply: posting permission, reported with the same codes as
/// the greeting but no mode switch actually performed (RFC 977
/// mode-switching is out of scope).
pub fn mode_reader_line(posting_allowed: bool) -> String {
    if posting_allowed {
        format!("{RESP_200_POSTING_ALLOWED} posting allowed\r\n")
    } else {
        format!("{RESP_201_POSTING_PROHIBITED} posting prohibited\r\n")
    }
}

/// DATE's reply: `111 yyyyMMddHHmmss\r\n`.
pub fn date_line(utc_stamp: &str) -> String {
    format!("{RESP_111_DATE} {utc_stamp}\r\n")
}
