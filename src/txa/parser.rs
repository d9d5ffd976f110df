//! Parse caption lines.

use log::{trace, warn};
use nom::{
    bytes::complete::take_while1,
    character::complete::{char, digit1, space1},
    combinator::{map_res, opt, recognize},
    error::{Error, ErrorKind},
    IResult, Parser as _,
};
use std::{
    io::{self, BufRead},
    str,
};

use super::{IResultExt as _, TxaError};
use crate::{
    content::{Caption, Position},
    time::TimeCode,
    track::CaptionTrack,
};

const COMMENT: &str = "//";

/// Parse a position coordinate.
fn coordinate(input: &str) -> IResult<&str, i32> {
    map_res(recognize((opt(char('-')), digit1)), |value: &str| {
        value.parse::<i32>()
    })
    .parse(input)
}

/// Parse a time in decimal seconds.
fn seconds(input: &str) -> IResult<&str, TimeCode> {
    map_res(
        take_while1(|c: char| c.is_ascii_digit() || c == '.'),
        TimeCode::parse_seconds,
    )
    .parse(input)
}

/// Parse the quoted text ending the line: `_("text")`.
///
/// The `_(` and `)` wrapping is optional. The text goes up to the last `"`
/// of the line, so it may contain quotes but can't contain `")`.
fn quoted_text(input: &str) -> IResult<&str, &str> {
    let (input, _) = (opt(char('_')), opt(char('(')), char('"')).parse(input)?;
    let body = input.strip_suffix(')').unwrap_or(input);
    body.strip_suffix('"').map_or_else(
        || Err(nom::Err::Error(Error::new(input, ErrorKind::Char))),
        |text| Ok(("", text)),
    )
}

/// Parse a whole caption line.
fn caption(input: &str) -> IResult<&str, Caption> {
    let (input, (x, _, y, _, begin, _, end, _, text)) = (
        coordinate,
        space1,
        coordinate,
        space1,
        seconds,
        space1,
        seconds,
        space1,
        quoted_text,
    )
        .parse(input)?;

    Ok((input, Caption::new(text, begin, end, Position::new(x, y))))
}

/// Parse one caption line, without its line ending.
///
/// # Errors
///
/// Will return a `NomError` if the line does not match the caption grammar.
pub fn parse_line(line: &str) -> Result<Caption, super::NomError> {
    caption(line).to_result_no_rest()
}

/// Add the caption of `line` to `track`, skipping blank, comment and malformed lines.
fn push_line(track: &mut CaptionTrack, line_num: usize, line: &str) {
    let line = line.trim();
    if line.is_empty() || line.starts_with(COMMENT) {
        trace!("skip line {line_num}");
        return;
    }
    match parse_line(line) {
        Ok(caption) => track.push(caption),
        Err(source) => {
            let err = TxaError::MalformedLine { line_num, source };
            warn!("{err}: {line:?}");
        }
    }
}

/// Read captions from a buffered reader.
///
/// Lines which are not captions, or not valid UTF-8, are skipped: a partially
/// broken file still gives all its valid captions.
///
/// # Errors
///
/// Will return the error built by `mkerr` if reading from `input` fails.
#[profiling::function]
pub fn read_track<T, Err>(mut input: T, mkerr: &Err) -> Result<CaptionTrack, TxaError>
where
    T: BufRead,
    Err: Fn(io::Error) -> TxaError,
{
    let mut track = CaptionTrack::new();
    let mut buf = Vec::with_capacity(256);
    let mut line_num = 0;
    while input.read_until(b'\n', &mut buf).map_err(mkerr)? > 0 {
        line_num += 1;
        match str::from_utf8(&buf) {
            Ok(line) => push_line(&mut track, line_num, line),
            Err(source) => {
                let err = TxaError::InvalidText { line_num, source };
                warn!("{err}: {:?}", String::from_utf8_lossy(&buf));
            }
        }
        buf.clear();
    }
    Ok(track)
}

/// Parse the content of a caption file.
#[must_use]
pub fn parse_track(content: &str) -> CaptionTrack {
    let mut track = CaptionTrack::new();
    content
        .lines()
        .enumerate()
        .for_each(|(idx, line)| push_line(&mut track, idx + 1, line));
    track
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caption_at(x: i32, y: i32, begin: u64, end: u64, text: &str) -> Caption {
        Caption::new(
            text,
            TimeCode::from_msecs(begin),
            TimeCode::from_msecs(end),
            Position::new(x, y),
        )
    }

    #[test]
    fn parse_written_line() {
        assert_eq!(
            parse_line("20\t432\t\t1.5\t4.2\t_(\"Hello there\")").unwrap(),
            caption_at(20, 432, 1500, 4200, "Hello there")
        );
    }

    #[test]
    fn parse_flexible_spacing() {
        assert_eq!(
            parse_line("0 10   12.25 \t 13 _(\"a\")").unwrap(),
            caption_at(0, 10, 12_250, 13_000, "a")
        );
    }

    #[test]
    fn parse_optional_wrapping() {
        assert_eq!(
            parse_line("1 2 0.1 0.2 \"bare\"").unwrap(),
            caption_at(1, 2, 100, 200, "bare")
        );
        assert_eq!(
            parse_line("1 2 0.1 0.2 _(\"\")").unwrap(),
            caption_at(1, 2, 100, 200, "")
        );
    }

    #[test]
    fn parse_text_to_last_quote() {
        assert_eq!(
            parse_line("1 2 0.1 0.2 _(\"say \"hi\" :)\")").unwrap(),
            caption_at(1, 2, 100, 200, "say \"hi\" :)")
        );
        // A `")` inside the text can't be told apart from the end of the line.
        assert_eq!(
            parse_line("1 2 0.1 0.2 _(\"a\") b\")").unwrap(),
            caption_at(1, 2, 100, 200, "a\") b")
        );
    }

    #[test]
    fn parse_rejects_malformed() {
        assert!(parse_line("hello world").is_err());
        assert!(parse_line("1 2 0.1 _(\"missing end\")").is_err());
        assert!(parse_line("1 2 0.1 0.2").is_err());
        assert!(parse_line("1 2 0.1 0.2 _(\"unterminated").is_err());
        assert!(parse_line("1 2 1.2.3 0.2 _(\"bad time\")").is_err());
        assert!(parse_line("1 2 0.1 0.2 _(\"a\")) ").is_err());
    }

    #[test]
    fn malformed_lines_skipped() {
        let _ = env_logger::builder().is_test(true).try_init();

        let track = parse_track("hello world\n20\t432\t\t1.0\t3.0\t_(\"A\")\n");
        assert_eq!(track.captions(), [caption_at(20, 432, 1000, 3000, "A")]);
    }

    #[test]
    fn comments_and_blanks_skipped() {
        let content = "// header\n\n   \n  // indented comment\n5 6 0.5 1.0 _(\"x\")\r\n";
        let track = parse_track(content);
        assert_eq!(track.captions(), [caption_at(5, 6, 500, 1000, "x")]);
    }

    #[test]
    fn read_from_buffer() {
        let content = b"1 1 0.0 1.0 _(\"a\")\n\n2 2 1.0 2.0 _(\"b\")";
        let track = read_track(&content[..], &|source| TxaError::FileUnreadable {
            source,
            path: "memory".into(),
        })
        .unwrap();
        assert_eq!(track.len(), 2);
        assert_eq!(track.get(1).map(|c| c.text.as_str()), Some("b"));
    }

    #[test]
    fn non_utf8_line_skipped() {
        let _ = env_logger::builder().is_test(true).try_init();

        let mut content = b"1 1 0.0 1.0 _(\"first\")\n1 1 1.0 2.0 _(\"caf".to_vec();
        content.push(0xE9);
        content.extend_from_slice(b"\")\n1 1 2.0 3.0 _(\"third\")\n");
        let track = read_track(&content[..], &|source| TxaError::FileUnreadable {
            source,
            path: "memory".into(),
        })
        .unwrap();
        assert_eq!(
            track.captions(),
            [
                caption_at(1, 1, 0, 1000, "first"),
                caption_at(1, 1, 2000, 3000, "third")
            ]
        );
    }
}
