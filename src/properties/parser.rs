//! Line-oriented `.properties` reader.
//!
//! Accepts the classic Java syntax: `#`/`!` comments, `key=value`,
//! `key:value` or `key value`, backslash line continuation and the
//! `\t \n \r \f \uXXXX` escapes. Trailing whitespace of a value is kept.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// 1-based line where the offending logical line starts.
    pub line: usize,
    pub message: String,
}

/// Parse property-file text into `(key, value)` pairs in file order.
pub fn parse(input: &str) -> Result<Vec<(String, String)>, ParseError> {
    let mut entries = Vec::new();
    let mut logical = String::new();
    let mut start_line = 0;
    let mut continuing = false;

    for (idx, raw) in physical_lines(input).enumerate() {
        let trimmed = raw.trim_start_matches(is_blank);

        if !continuing {
            if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
                continue;
            }
            start_line = idx + 1;
            logical.clear();
        }

        if ends_with_continuation(trimmed) {
            logical.push_str(&trimmed[..trimmed.len() - 1]);
            continuing = true;
            continue;
        }

        logical.push_str(trimmed);
        continuing = false;
        entries.push(parse_entry(&logical, start_line)?);
    }

    // A continuation on the last line still ends the entry.
    if continuing {
        entries.push(parse_entry(&logical, start_line)?);
    }

    Ok(entries)
}

/// Split on `\r\n`, `\n` or a bare `\r`.
fn physical_lines(input: &str) -> impl Iterator<Item = &str> {
    input.split('\n').flat_map(|line| {
        let line = line.strip_suffix('\r').unwrap_or(line);
        line.split('\r')
    })
}

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\u{c}')
}

fn ends_with_continuation(line: &str) -> bool {
    let slashes = line.chars().rev().take_while(|&c| c == '\\').count();
    slashes % 2 == 1
}

fn parse_entry(line: &str, line_no: usize) -> Result<(String, String), ParseError> {
    let chars: Vec<char> = line.chars().collect();
    let mut key_end = chars.len();
    let mut value_start = chars.len();
    let mut has_separator = false;

    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c == '\\' {
            i += 2;
            continue;
        }
        if c == '=' || c == ':' {
            key_end = i;
            value_start = i + 1;
            has_separator = true;
            break;
        }
        if is_blank(c) {
            key_end = i;
            value_start = i + 1;
            break;
        }
        i += 1;
    }

    while value_start < chars.len() {
        let c = chars[value_start];
        if !is_blank(c) {
            if !has_separator && (c == '=' || c == ':') {
                has_separator = true;
            } else {
                break;
            }
        }
        value_start += 1;
    }

    let key = unescape(&chars[..key_end], line_no)?;
    let value = unescape(&chars[value_start..], line_no)?;
    Ok((key, value))
}

fn unescape(chars: &[char], line_no: usize) -> Result<String, ParseError> {
    let mut out = String::with_capacity(chars.len());
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        i += 1;
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(&escaped) = chars.get(i) else {
            break;
        };
        i += 1;
        match escaped {
            't' => out.push('\t'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            'f' => out.push('\u{c}'),
            'u' => {
                let unit = hex_unit(chars, i, line_no)?;
                i += 4;
                out.push(decode_unit(unit, chars, &mut i, line_no)?);
            }
            other => out.push(other),
        }
    }

    Ok(out)
}

fn hex_unit(chars: &[char], at: usize, line_no: usize) -> Result<u32, ParseError> {
    let digits: String = chars.iter().skip(at).take(4).collect();
    if digits.chars().count() != 4 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(malformed_unicode(line_no));
    }
    u32::from_str_radix(&digits, 16).map_err(|_| malformed_unicode(line_no))
}

/// Turn a decoded `\uXXXX` unit into a char, pairing a high surrogate with
/// the `\uXXXX` escape that must immediately follow it.
fn decode_unit(
    unit: u32,
    chars: &[char],
    i: &mut usize,
    line_no: usize,
) -> Result<char, ParseError> {
    if (0xD800..0xDC00).contains(&unit) {
        let has_low = chars.get(*i) == Some(&'\\') && chars.get(*i + 1) == Some(&'u');
        if has_low {
            let low = hex_unit(chars, *i + 2, line_no)?;
            if (0xDC00..0xE000).contains(&low) {
                *i += 6;
                let code = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
                return char::from_u32(code).ok_or_else(|| malformed_unicode(line_no));
            }
        }
        return Err(ParseError {
            line: line_no,
            message: format!("unpaired surrogate \\u{unit:04X}"),
        });
    }
    char::from_u32(unit).ok_or_else(|| ParseError {
        line: line_no,
        message: format!("unpaired surrogate \\u{unit:04X}"),
    })
}

fn malformed_unicode(line_no: usize) -> ParseError {
    ParseError {
        line: line_no,
        message: "malformed \\uxxxx encoding".into(),
    }
}
