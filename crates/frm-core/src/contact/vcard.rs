//! vCard text codec
//!
//! Reads and writes a single `BEGIN:VCARD ... END:VCARD` object. Values are
//! kept verbatim (no unescaping), and property order, name spelling and
//! group prefixes are preserved, so a read-modify-write cycle only changes
//! the properties that were touched.

use thiserror::Error;

use super::card::{Card, Field, FIELD_VERSION};

/// Maximum line length in octets before folding
const FOLD_WIDTH: usize = 75;

const DEFAULT_VERSION: &str = "3.0";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum VcardError {
    #[error("missing BEGIN:VCARD")]
    MissingBegin,

    #[error("missing END:VCARD")]
    MissingEnd,

    #[error("malformed line {line}: {content:?}")]
    MalformedLine { line: usize, content: String },

    #[error("not valid UTF-8 (first bad byte at offset {offset})")]
    InvalidUtf8 { offset: usize },
}

/// Parse raw file bytes, refusing anything that is not UTF-8
pub fn parse_bytes(bytes: &[u8]) -> Result<Card, VcardError> {
    let text = std::str::from_utf8(bytes).map_err(|e| VcardError::InvalidUtf8 {
        offset: e.valid_up_to(),
    })?;
    parse(text)
}

/// Parse vCard text into a card
pub fn parse(text: &str) -> Result<Card, VcardError> {
    let lines = unfold(text);
    let mut iter = lines.iter().filter(|(_, l)| !l.trim().is_empty());

    match iter.next() {
        Some((_, first)) if first.trim().eq_ignore_ascii_case("BEGIN:VCARD") => {}
        _ => return Err(VcardError::MissingBegin),
    }

    let mut card = Card::new();
    for (number, line) in iter {
        if line.trim().eq_ignore_ascii_case("END:VCARD") {
            return Ok(card);
        }
        let (name, field) = parse_line(line).ok_or_else(|| VcardError::MalformedLine {
            line: *number,
            content: line.clone(),
        })?;
        card.add(&name, field);
    }

    Err(VcardError::MissingEnd)
}

/// Serialize a card to vCard text with CRLF line endings
pub fn serialize(card: &Card) -> String {
    let mut out = String::new();
    push_folded(&mut out, "BEGIN:VCARD");
    if !card.contains(FIELD_VERSION) {
        push_folded(&mut out, &format!("{FIELD_VERSION}:{DEFAULT_VERSION}"));
    }

    for (name, field) in card.iter() {
        let mut line = String::new();
        if let Some(group) = &field.group {
            line.push_str(group);
            line.push('.');
        }
        line.push_str(name);
        for (param, value) in &field.params {
            line.push(';');
            line.push_str(param);
            line.push('=');
            if value.contains([':', ';']) {
                line.push('"');
                line.push_str(value);
                line.push('"');
            } else {
                line.push_str(value);
            }
        }
        line.push(':');
        line.push_str(&field.value);
        push_folded(&mut out, &line);
    }

    push_folded(&mut out, "END:VCARD");
    out
}

/// Join folded continuation lines, keeping the 1-based number of the
/// line each logical line started on.
fn unfold(text: &str) -> Vec<(usize, String)> {
    let mut lines: Vec<(usize, String)> = Vec::new();
    for (index, raw) in text.split('\n').enumerate() {
        let raw = raw.strip_suffix('\r').unwrap_or(raw);
        if let Some(rest) = raw.strip_prefix([' ', '\t']) {
            if let Some((_, last)) = lines.last_mut() {
                last.push_str(rest);
                continue;
            }
        }
        lines.push((index + 1, raw.to_string()));
    }
    lines
}

/// Split `GROUP.NAME;PARAM=VALUE:value` into a property name and field
fn parse_line(line: &str) -> Option<(String, Field)> {
    let colon = find_unquoted(line, ':')?;
    let (head, value) = (&line[..colon], &line[colon + 1..]);

    let mut parts = split_unquoted(head, ';').into_iter();
    let qualified = parts.next()?.trim();
    let (group, name) = match qualified.rsplit_once('.') {
        Some((group, name)) => (Some(group), name),
        None => (None, qualified),
    };
    if name.is_empty() || group.is_some_and(str::is_empty) {
        return None;
    }

    let mut field = Field::new(value);
    field.group = group.map(str::to_string);
    for param in parts {
        match param.split_once('=') {
            Some((key, val)) => {
                field = field.with_param(key.trim(), val.trim().trim_matches('"'));
            }
            // vCard 2.1 bare parameters are types
            None if !param.trim().is_empty() => {
                field = field.with_param("TYPE", param.trim());
            }
            None => {}
        }
    }

    Some((name.to_string(), field))
}

fn find_unquoted(s: &str, needle: char) -> Option<usize> {
    let mut quoted = false;
    for (i, c) in s.char_indices() {
        match c {
            '"' => quoted = !quoted,
            c if c == needle && !quoted => return Some(i),
            _ => {}
        }
    }
    None
}

fn split_unquoted(s: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut quoted = false;
    let mut start = 0;
    for (i, c) in s.char_indices() {
        match c {
            '"' => quoted = !quoted,
            c if c == sep && !quoted => {
                parts.push(&s[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&s[start..]);
    parts
}

/// Append a content line, folding at `FOLD_WIDTH` octets on char boundaries
fn push_folded(out: &mut String, line: &str) {
    let mut width = 0;
    for c in line.chars() {
        let len = c.len_utf8();
        if width + len > FOLD_WIDTH {
            out.push_str("\r\n ");
            width = 1;
        }
        out.push(c);
        width += len;
    }
    out.push_str("\r\n");
}
