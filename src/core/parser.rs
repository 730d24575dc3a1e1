//! Parsing of raw dictionary lines of the form `key=[R1,R2,...]`.

use crate::core::types::{CodePoint, Reading, Record};
use crate::error::{PinyinError, Result};
use serde::{Deserialize, Serialize};

const LEFT_BRACKET: char = '[';
const RIGHT_BRACKET: char = ']';
const COMMA: char = ',';
const KEY_SEPARATOR: char = '=';

/// Extracts the ordered reading list from a line like `20013=[ZHONG1,ZHONG4]`.
///
/// Only the literal `[`, `]` and `,` separators are interpreted; tone digits are
/// not validated here. A line missing either bracket is malformed.
pub fn parse_pinyin_string(line: &str) -> Result<Vec<Reading>> {
    let left = line
        .find(LEFT_BRACKET)
        .ok_or_else(|| PinyinError::malformed("missing '['"))?;
    let right = line
        .rfind(RIGHT_BRACKET)
        .ok_or_else(|| PinyinError::malformed("missing ']'"))?;
    if right < left {
        return Err(PinyinError::malformed("']' before '['"));
    }

    let readings: Vec<Reading> = line[left + 1..right]
        .split(COMMA)
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(str::to_string)
        .collect();

    if readings.is_empty() {
        return Err(PinyinError::malformed("empty reading list"));
    }
    Ok(readings)
}

/// How bare numeric keys in a table are read. Fixed for a whole table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum KeyRadix {
    /// `20013`
    #[default]
    Decimal,
    /// `4E2D`
    Hex,
}

/// Parses the key half of a record into code points.
///
/// Accepts a comma separated list of numbers read in `radix`. A `0x`/`U+`
/// prefix always means hex, and so does a hex letter in a decimal table.
/// Anything non-numeric is taken as the literal characters themselves, e.g. `中国`.
pub fn parse_key(key: &str, radix: KeyRadix) -> Result<Vec<CodePoint>> {
    let key = key.trim();
    if key.is_empty() {
        return Err(PinyinError::malformed("empty key"));
    }

    let tokens: Vec<&str> = key.split(COMMA).map(str::trim).collect();
    if tokens.iter().all(|t| looks_numeric(t)) {
        return tokens
            .into_iter()
            .map(|token| parse_code_point(token, radix))
            .collect();
    }

    Ok(key
        .chars()
        .filter(|c| !c.is_whitespace() && *c != COMMA)
        .map(u32::from)
        .collect())
}

/// Parses a full `key=[...]` line.
pub fn parse_record(line: &str, radix: KeyRadix) -> Result<Record> {
    let (key, _) = line
        .split_once(KEY_SEPARATOR)
        .ok_or_else(|| PinyinError::malformed("missing '='"))?;
    let readings = parse_pinyin_string(line)?;
    let key = parse_key(key, radix)?;
    Ok(Record { key, readings })
}

fn looks_numeric(token: &str) -> bool {
    let digits = strip_hex_prefix(token).unwrap_or(token);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_hexdigit())
}

fn strip_hex_prefix(token: &str) -> Option<&str> {
    ["0x", "0X", "U+", "u+"]
        .iter()
        .find_map(|prefix| token.strip_prefix(*prefix))
}

fn parse_code_point(token: &str, radix: KeyRadix) -> Result<CodePoint> {
    let value = match (strip_hex_prefix(token), radix) {
        (Some(hex), _) => u32::from_str_radix(hex, 16),
        (None, KeyRadix::Hex) => u32::from_str_radix(token, 16),
        (None, KeyRadix::Decimal) if token.chars().any(|c| c.is_ascii_alphabetic()) => {
            u32::from_str_radix(token, 16)
        }
        (None, KeyRadix::Decimal) => token.parse::<u32>(),
    }
    .map_err(|_| PinyinError::InvalidCodePoint(token.to_string()))?;

    // Reject surrogates and anything past U+10FFFF.
    char::from_u32(value)
        .map(u32::from)
        .ok_or_else(|| PinyinError::InvalidCodePoint(token.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_bracketed_readings_in_order() {
        let readings = parse_pinyin_string("34892=[XING2,HANG2,HANG4,HENG2]").unwrap();
        assert_eq!(readings, vec!["XING2", "HANG2", "HANG4", "HENG2"]);
    }

    #[test]
    fn malformed_lines_are_rejected() {
        assert!(parse_pinyin_string("not_a_valid_line").is_err());
        assert!(parse_pinyin_string("20013=[ZHONG1").is_err());
        assert!(parse_pinyin_string("20013=ZHONG1]").is_err());
        assert!(parse_pinyin_string("20013=[]").is_err());
        assert!(parse_record("[ZHONG1]", KeyRadix::Decimal).is_err());
    }

    #[test]
    fn tone_digits_are_not_validated() {
        let readings = parse_pinyin_string("1=[abc9,xyz]").unwrap();
        assert_eq!(readings, vec!["abc9", "xyz"]);
    }

    #[test]
    fn keys_accept_decimal_hex_and_literal_forms() {
        assert_eq!(parse_key("20013", KeyRadix::Decimal).unwrap(), vec![0x4E2D]);
        assert_eq!(parse_key("4E2D", KeyRadix::Decimal).unwrap(), vec![0x4E2D]);
        assert_eq!(parse_key("0x4e2d", KeyRadix::Decimal).unwrap(), vec![0x4E2D]);
        assert_eq!(parse_key("U+56FD", KeyRadix::Decimal).unwrap(), vec![0x56FD]);
        assert_eq!(parse_key("20013,22269", KeyRadix::Decimal).unwrap(), vec![0x4E2D, 0x56FD]);
        assert_eq!(parse_key("中国", KeyRadix::Decimal).unwrap(), vec![0x4E2D, 0x56FD]);
    }

    #[test]
    fn hex_tables_read_digit_only_keys_as_hex() {
        assert_eq!(parse_key("5000", KeyRadix::Hex).unwrap(), vec![0x5000]);
        assert_eq!(parse_key("6211", KeyRadix::Hex).unwrap(), vec![0x6211]);
        assert_eq!(parse_key("4E2D,56FD", KeyRadix::Hex).unwrap(), vec![0x4E2D, 0x56FD]);
        assert_eq!(parse_key("5000", KeyRadix::Decimal).unwrap(), vec![5000]);
        assert_eq!(parse_key("0x5000", KeyRadix::Decimal).unwrap(), vec![0x5000]);
        assert_eq!(parse_key("中国", KeyRadix::Hex).unwrap(), vec![0x4E2D, 0x56FD]);
    }

    #[test]
    fn out_of_range_code_points_fail() {
        assert!(matches!(
            parse_key("0x110000", KeyRadix::Decimal),
            Err(PinyinError::InvalidCodePoint(_))
        ));
        assert!(parse_key("0xD800", KeyRadix::Decimal).is_err());
    }

    #[test]
    fn parses_phrase_record() {
        let record = parse_record("20013,22269=[ZHONG1,GUO2]", KeyRadix::Decimal).unwrap();
        assert_eq!(record.key, vec![0x4E2D, 0x56FD]);
        assert_eq!(record.readings, vec!["ZHONG1", "GUO2"]);
    }
}
