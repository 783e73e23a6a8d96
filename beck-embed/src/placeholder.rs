use beck_core::{Error, ParameterKey, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderKind {
    /// Plain `?`, keyed by its 1-based ordinal among the `?` occurrences.
    Positional,
    /// `$n` with a positive index.
    Indexed,
    /// `:name`.
    Named,
}

/// One placeholder occurrence in the SQL text.
#[derive(Debug, Clone, PartialEq)]
pub struct Placeholder {
    /// Byte offset of the marker in the source SQL.
    pub offset: usize,
    /// Byte length of the marker text.
    pub len: usize,
    pub kind: PlaceholderKind,
    /// Normalized identity, shared by every occurrence of the same
    /// parameter.
    pub key: ParameterKey,
}

/// Scans the SQL text and returns every placeholder occurrence in source
/// order.
///
/// Markers inside string literals, quoted identifiers and comments are not
/// placeholders. `::` is consumed as cast syntax and `$` not followed by a
/// digit is plain text; everything else starting with `:` or an out of
/// range `$` index is a parse failure. The scan is deterministic: parsing
/// the same text twice yields identical sequences.
pub fn parse_placeholders(sql: &str) -> Result<Vec<Placeholder>> {
    let bytes = sql.as_bytes();
    let mut placeholders = Vec::new();
    let mut positional = 0u32;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\'' | b'"' => i = skip_quoted(bytes, i),
            b'-' if bytes.get(i + 1) == Some(&b'-') => {
                while i < bytes.len() && bytes[i] != b'\n' {
                    i += 1;
                }
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => i = skip_block_comment(bytes, i),
            b'?' => {
                positional += 1;
                placeholders.push(Placeholder {
                    offset: i,
                    len: 1,
                    kind: PlaceholderKind::Positional,
                    key: ParameterKey::Index(positional.into()),
                });
                i += 1;
            }
            b'$' if bytes.get(i + 1).is_some_and(u8::is_ascii_digit) => {
                let offset = i;
                i += 1;
                let mut index = 0u64;
                while i < bytes.len() && bytes[i].is_ascii_digit() {
                    index = index * 10 + (bytes[i] - b'0') as u64;
                    if index > u32::MAX as u64 {
                        return Err(parse_error("parameter index is out of range", offset));
                    }
                    i += 1;
                }
                if index == 0 {
                    return Err(parse_error("parameter index must be positive", offset));
                }
                placeholders.push(Placeholder {
                    offset,
                    len: i - offset,
                    kind: PlaceholderKind::Indexed,
                    key: ParameterKey::Index(index as i64),
                });
            }
            b':' => {
                if bytes.get(i + 1) == Some(&b':') {
                    // Cast syntax.
                    i += 2;
                    continue;
                }
                let offset = i;
                i += 1;
                let name_start = i;
                while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_') {
                    i += 1;
                }
                if i == name_start {
                    return Err(parse_error("parameter name is empty", offset));
                }
                if bytes[name_start].is_ascii_digit() {
                    return Err(parse_error(
                        "parameter name must start with a letter or `_`",
                        offset,
                    ));
                }
                placeholders.push(Placeholder {
                    offset,
                    len: i - offset,
                    kind: PlaceholderKind::Named,
                    key: ParameterKey::Name(sql[name_start..i].to_owned()),
                });
            }
            _ => i += 1,
        }
    }
    Ok(placeholders)
}

fn parse_error(message: &str, offset: usize) -> Error {
    let error = Error::Parse {
        message: message.into(),
        offset,
    };
    log::error!("{error}");
    error
}

fn skip_quoted(bytes: &[u8], start: usize) -> usize {
    let quote = bytes[start];
    let mut i = start + 1;
    while i < bytes.len() {
        if bytes[i] == quote {
            if bytes.get(i + 1) == Some(&quote) {
                // Doubled quote escape.
                i += 2;
                continue;
            }
            return i + 1;
        }
        i += 1;
    }
    // Unterminated literal runs to the end, the engine will reject the SQL.
    bytes.len()
}

fn skip_block_comment(bytes: &[u8], start: usize) -> usize {
    let mut depth = 1;
    let mut i = start + 2;
    while i < bytes.len() && depth > 0 {
        if bytes[i] == b'/' && bytes.get(i + 1) == Some(&b'*') {
            depth += 1;
            i += 2;
        } else if bytes[i] == b'*' && bytes.get(i + 1) == Some(&b'/') {
            depth -= 1;
            i += 2;
        } else {
            i += 1;
        }
    }
    i
}
