//! Request-line tokenizing and the NEWGROUPS/NEWNEWS date argument format.

use nom::IResult;
use nom::{
    bytes::complete::{is_not, take_while1},
    character::complete::{crlf, space1},
    combinator::opt,
    multi::separated_list1,
    sequence::preceded,
};

#[derive(Debug, PartialEq, Eq)]
pub struct Command {
    pub name: String,
    pub args: Vec<String>,
}

/// Parses a single NNTP command line (RFC 3977 §3.1): a verb, whitespace,
/// then whitespace-separated arguments.
pub fn parse_command(input: &str) -> IResult<&str, Command> {
    let (input, name) = take_while1(|c: char| c.is_ascii_alphabetic())(input)?;
    let (input, args) = opt(preceded(space1, separated_list1(space1, is_not(" \r\n"))))(input)?;
    let (input, _) = opt(crlf)(input)?;
    let args_vec = args
        .unwrap_or_default()
        .into_iter()
        .map(|s: &str| s.to_string())
        .collect();
    Ok((
        input,
        Command {
            name: name.to_ascii_uppercase(),
            args: args_vec,
        },
    ))
}

/// Parses the `date time [GMT]` argument triple shared by NEWGROUPS and
/// NEWNEWS (RFC 3977 §7.3.1/§7.4.1). `date` is 6 digits (`yyMMdd`) or 8
/// digits (`yyyyMMdd`); `time` is always 6 digits (`HHmmss`). Per §4.4, the
/// instant is parsed as UTC whether or not the `GMT` token is present — the
/// token is accepted but doesn't change parsing, it's never treated as
/// local time.
pub fn parse_datetime(
    date: &str,
    time: &str,
    _gmt: bool,
) -> Result<chrono::DateTime<chrono::Utc>, &'static str> {
    if !(date.len() == 6 || date.len() == 8) || !date.chars().all(|c| c.is_ascii_digit()) {
        return Err("invalid date");
    }
    if time.len() != 6 || !time.chars().all(|c| c.is_ascii_digit()) {
        return Err("invalid time");
    }
    let fmt = if date.len() == 6 { "%y%m%d" } else { "%Y%m%d" };
    let naive_date = chrono::NaiveDate::parse_from_str(date, fmt).map_err(|_| "invalid date")?;
    let naive_time =
        chrono::NaiveTime::parse_from_str(time, "%H%M%S").map_err(|_| "invalid time")?;
    let naive = naive_date.and_time(naive_time);
    Ok(chrono::DateTime::<chrono::Utc>::from_naive_utc_and_offset(
        naive,
        chrono::Utc,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command_simple() {
        let (_, cmd) = parse_command("ARTICLE\r\n").unwrap();
        assert_eq!(cmd.name, "ARTICLE");
        assert!(cmd.args.is_empty());
    }

    #[test]
    fn test_parse_command_args() {
        let (_, cmd) = parse_command("GROUP comp.lang.rust\r\n").unwrap();
        assert_eq!(cmd.name, "GROUP");
        assert_eq!(cmd.args, vec!["comp.lang.rust"]);
    }

    #[test]
    fn test_parse_command_lowercase_verb_is_uppercased() {
        let (_, cmd) = parse_command("quit\r\n").unwrap();
        assert_eq!(cmd.name, "QUIT");
    }

    #[test]
    fn test_parse_datetime_8_digit_gmt() {
        let dt = parse_datetime("20990101", "000000", true).unwrap();
        assert_eq!(dt.to_rfc3339(), "2099-01-01T00:00:00+00:00");
    }

    #[test]
    fn test_parse_datetime_rejects_bad_length() {
        assert!(parse_datetime("2099011", "000000", true).is_err());
        assert!(parse_datetime("20990101", "00000", true).is_err());
    }
}
