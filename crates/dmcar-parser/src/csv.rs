//! Comma-separated values reader.
//!
//! Splits text into records of string fields. Quoted fields may contain
//! commas, line breaks and doubled quotes (`""`). Both `\n` and `\r\n` end a
//! record; blank lines are skipped.

use winnow::{
    Parser as _,
    combinator::{alt, delimited, repeat, separated},
    error::{ContextError, ErrMode},
    token::{none_of, take_while},
};

use crate::error::{Diagnostic, ErrorCode};

type Input<'src> = &'src str;
type IResult<O> = std::result::Result<O, ErrMode<ContextError>>;

/// Parses `source` into records.
///
/// # Errors
///
/// Returns an [`ErrorCode::E002`] diagnostic pointing at the line where
/// reading stopped, typically an unterminated quoted field.
pub(crate) fn parse_records(source: &str) -> Result<Vec<Vec<String>>, Diagnostic> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    let mut input = source;

    let parsed = match records(&mut input) {
        Ok(parsed) if input.is_empty() => parsed,
        _ => return Err(malformed(source, input)),
    };

    Ok(parsed
        .into_iter()
        .filter(|record| !(record.len() == 1 && record[0].is_empty()))
        .collect())
}

fn records(input: &mut Input<'_>) -> IResult<Vec<Vec<String>>> {
    separated(1.., record, line_ending).parse_next(input)
}

fn record(input: &mut Input<'_>) -> IResult<Vec<String>> {
    separated(1.., field, ',').parse_next(input)
}

fn field(input: &mut Input<'_>) -> IResult<String> {
    alt((quoted_field, bare_field)).parse_next(input)
}

fn quoted_field(input: &mut Input<'_>) -> IResult<String> {
    delimited(
        '"',
        repeat(0.., alt(("\"\"".value('"'), none_of('"')))),
        '"',
    )
    .parse_next(input)
}

fn bare_field(input: &mut Input<'_>) -> IResult<String> {
    take_while(0.., |c: char| !matches!(c, ',' | '"' | '\r' | '\n'))
        .map(str::to_string)
        .parse_next(input)
}

fn line_ending<'src>(input: &mut Input<'src>) -> IResult<&'src str> {
    alt(("\r\n", "\n")).parse_next(input)
}

fn malformed(source: &str, remaining: &str) -> Diagnostic {
    let offset = source.len() - remaining.len();
    let line = source[..offset].matches('\n').count() + 1;
    Diagnostic::error(format!("malformed CSV near line {line}"))
        .with_code(ErrorCode::E002)
        .with_help("check for an unterminated quoted field or a stray quote")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_records() {
        let records = parse_records("a,b,c\n1,2,3\n").unwrap();
        assert_eq!(records, vec![vec!["a", "b", "c"], vec!["1", "2", "3"]]);
    }

    #[test]
    fn test_empty_fields_and_crlf() {
        let records = parse_records("a,,c\r\n,,\r\n").unwrap();
        assert_eq!(records, vec![vec!["a", "", "c"], vec!["", "", ""]]);
    }

    #[test]
    fn test_quoted_fields() {
        let records = parse_records("\"one, two\",\"say \"\"hi\"\"\",\"line\nbreak\"\n").unwrap();
        assert_eq!(
            records,
            vec![vec!["one, two", "say \"hi\"", "line\nbreak"]]
        );
    }

    #[test]
    fn test_blank_lines_and_bom_are_skipped() {
        let records = parse_records("\u{feff}a,b\n\n1,2").unwrap();
        assert_eq!(records, vec![vec!["a", "b"], vec!["1", "2"]]);
    }

    #[test]
    fn test_unterminated_quote() {
        let err = parse_records("a,b\n1,\"open\n").unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::E002));
        assert_eq!(err.message(), "malformed CSV near line 2");
    }
}
