//! Path tokenizer
//!
//! Splits a path such as `Orders.Latest(3).Total` into ordered segments and
//! classifies each segment as a member, an indexer or a call. Parenthesized
//! argument lists are kept whole, so dots and commas inside them never split
//! a segment.

use crate::error::{ParseError, Result};

/// Token that resolves to the current node itself
pub const SELF_TOKEN: &str = "Self";

/// Split a path into segment strings
///
/// Paths without parentheses degenerate to a dot split with empty pieces
/// removed. Unbalanced parentheses are reported with the character position
/// of the offending parenthesis.
pub fn tokenize(path: &str) -> Result<Vec<String>> {
    let chars: Vec<char> = path.chars().collect();
    let mut open_stack = Vec::new();
    let mut groups = Vec::new();

    for (i, c) in chars.iter().enumerate() {
        match c {
            '(' => open_stack.push(i),
            ')' => {
                let open = open_stack.pop().ok_or_else(|| ParseError::MalformedPath {
                    path: path.to_string(),
                    position: i,
                })?;
                if open_stack.is_empty() {
                    groups.push((open, i));
                }
            }
            _ => {}
        }
    }

    if let Some(&open) = open_stack.first() {
        return Err(ParseError::MalformedPath {
            path: path.to_string(),
            position: open,
        });
    }

    if groups.is_empty() {
        return Ok(split_members(path));
    }

    let mut segments = Vec::new();
    let mut cursor = 0;
    for (open, close) in groups {
        let prefix: String = chars[cursor..open].iter().collect();
        let mut pieces: Vec<&str> = prefix.split('.').collect();
        let callee = pieces.pop().unwrap_or_default();
        segments.extend(split_pieces(pieces));

        let group: String = chars[open..=close].iter().collect();
        segments.push(format!("{}{}", callee, group));
        cursor = close + 1;
    }

    let residual: String = chars[cursor..].iter().collect();
    segments.extend(split_members(&residual));

    log::debug!("Tokenized path '{}' into {:?}", path, segments);
    Ok(segments)
}

fn split_members(text: &str) -> Vec<String> {
    split_pieces(text.split('.'))
}

fn split_pieces<'a>(pieces: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    pieces
        .into_iter()
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

/// Key of a bracket indexer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexKey {
    /// Integer key: positional access into a sequence
    Position(usize),
    /// Any other key: dictionary lookup
    Key(String),
}

/// A classified path segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// `Self`: the current node itself
    SelfRef,
    /// `name(arg1, arg2)`: macro or function call with literal arguments
    Call { name: String, args: Vec<String> },
    /// `name[key]`: member followed by an index or key lookup; `name` is
    /// empty when the brackets follow a call
    Index { name: String, key: IndexKey },
    /// Plain member name
    Member(String),
}

impl Segment {
    /// Classify one segment string
    pub fn parse(text: &str) -> Segment {
        let text = text.trim();
        if text == SELF_TOKEN {
            return Segment::SelfRef;
        }

        if let Some((name, inner)) = split_enclosed(text, '(', ')') {
            return Segment::Call {
                name: name.to_string(),
                args: split_arguments(inner),
            };
        }

        if let Some((name, inner)) = split_enclosed(text, '[', ']') {
            let key = unquote(inner.trim());
            let key = match key.parse::<usize>() {
                Ok(position) => IndexKey::Position(position),
                Err(_) => IndexKey::Key(key.to_string()),
            };
            return Segment::Index {
                name: name.to_string(),
                key,
            };
        }

        Segment::Member(text.to_string())
    }

    /// Name of the member, call or indexed member
    pub fn name(&self) -> &str {
        match self {
            Segment::SelfRef => SELF_TOKEN,
            Segment::Call { name, .. } | Segment::Index { name, .. } => name,
            Segment::Member(name) => name,
        }
    }
}

/// Split `name<open>inner<close>` when `name` is an identifier
///
/// Brackets may also stand alone (`[0]` after a call) and then index the
/// current node.
fn split_enclosed(text: &str, open: char, close: char) -> Option<(&str, &str)> {
    let body = text.strip_suffix(close)?;
    let start = body.find(open)?;
    let name = body[..start].trim();
    if !is_identifier(name) && !(name.is_empty() && open == '[') {
        return None;
    }
    Some((name, &body[start + open.len_utf8()..]))
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}

/// Split an argument list on top-level commas
///
/// Commas nested in parentheses, brackets or quotes do not split. Each
/// argument is trimmed and unquoted.
pub fn split_arguments(args: &str) -> Vec<String> {
    if args.trim().is_empty() {
        return Vec::new();
    }

    let mut result = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;

    for c in args.chars() {
        match (quote, c) {
            (Some(q), c) if c == q => {
                quote = None;
                current.push(c);
            }
            (Some(_), c) => current.push(c),
            (None, '"' | '\'') => {
                quote = Some(c);
                current.push(c);
            }
            (None, '(' | '[') => {
                depth += 1;
                current.push(c);
            }
            (None, ')' | ']') => {
                depth = depth.saturating_sub(1);
                current.push(c);
            }
            (None, ',') if depth == 0 => {
                result.push(unquote(current.trim()).to_string());
                current.clear();
            }
            (None, c) => current.push(c),
        }
    }
    result.push(unquote(current.trim()).to_string());

    result
}

/// Strip one pair of matching single or double quotes
pub fn unquote(text: &str) -> &str {
    let quoted = text.len() >= 2
        && ((text.starts_with('"') && text.ends_with('"'))
            || (text.starts_with('\'') && text.ends_with('\'')));
    if quoted {
        &text[1..text.len() - 1]
    } else {
        text
    }
}
