//! Replacement templates for pattern rules
//!
//! A template is static text interleaved with capture slots:
//! - `$1`, `${1}` - numbered capture group (`$0` is the whole match)
//! - `${name}` - named capture group
//! - `$$` - a literal `$`
//!
//! Templates are parsed once and checked against the pattern they belong to,
//! so a reference to a group the pattern does not define is rejected before
//! any text is rewritten.

use regex::{Captures, Regex};
use thiserror::Error;

/// Errors found while parsing a template
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("`$` at byte {0} is not followed by a group reference (use `$$` for a literal `$`)")]
    DanglingDollar(usize),

    #[error("unclosed `${{` at byte {0}")]
    UnclosedBrace(usize),

    #[error("invalid group name `{name}` at byte {offset}")]
    InvalidGroupName { name: String, offset: usize },
}

/// One piece of a parsed template
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    Group(usize),
    Named(String),
}

/// A parsed replacement template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    /// Parse a template string
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut text = String::new();
        let mut rest = source;
        let mut offset = 0;

        while let Some(pos) = rest.find('$') {
            text.push_str(&rest[..pos]);
            let dollar = offset + pos;
            let after = &rest[pos + 1..];

            let consumed = if after.starts_with('$') {
                text.push('$');
                2
            } else if let Some(inner) = after.strip_prefix('{') {
                let close = inner.find('}').ok_or(TemplateError::UnclosedBrace(dollar))?;
                let name = &inner[..close];
                flush(&mut segments, &mut text);
                segments.push(slot(name, dollar)?);
                close + 3
            } else {
                let digits = after.bytes().take_while(u8::is_ascii_digit).count();
                if digits == 0 {
                    return Err(TemplateError::DanglingDollar(dollar));
                }
                flush(&mut segments, &mut text);
                segments.push(slot(&after[..digits], dollar)?);
                digits + 1
            };

            rest = &rest[pos + consumed..];
            offset = dollar + consumed;
        }

        text.push_str(rest);
        flush(&mut segments, &mut text);
        Ok(Self { segments })
    }

    /// Highest numbered group referenced, if any
    pub fn max_group(&self) -> Option<usize> {
        self.segments
            .iter()
            .filter_map(|s| match s {
                Segment::Group(n) => Some(*n),
                _ => None,
            })
            .max()
    }

    /// Named groups referenced, in order of appearance
    pub fn group_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Named(name) => Some(name.as_str()),
            _ => None,
        })
    }

    /// Check that every slot refers to a group defined by `regex`
    pub fn check_against(&self, regex: &Regex) -> Result<(), MissingGroup> {
        if let Some(max) = self.max_group() {
            if max >= regex.captures_len() {
                return Err(MissingGroup::Index {
                    group: max,
                    available: regex.captures_len() - 1,
                });
            }
        }
        for name in self.group_names() {
            if !regex.capture_names().flatten().any(|n| n == name) {
                return Err(MissingGroup::Name(name.to_string()));
            }
        }
        Ok(())
    }

    /// Render the template for one match
    ///
    /// A group that did not take part in the match renders as empty text.
    pub fn render(&self, caps: &Captures<'_>) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Group(n) => {
                    if let Some(m) = caps.get(*n) {
                        out.push_str(m.as_str());
                    }
                }
                Segment::Named(name) => {
                    if let Some(m) = caps.name(name) {
                        out.push_str(m.as_str());
                    }
                }
            }
        }
        out
    }
}

/// A template slot with no matching group in its pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MissingGroup {
    Index { group: usize, available: usize },
    Name(String),
}

fn flush(segments: &mut Vec<Segment>, text: &mut String) {
    if !text.is_empty() {
        segments.push(Segment::Text(std::mem::take(text)));
    }
}

fn slot(name: &str, offset: usize) -> Result<Segment, TemplateError> {
    if !name.is_empty() && name.bytes().all(|b| b.is_ascii_digit()) {
        return name
            .parse()
            .map(Segment::Group)
            .map_err(|_| TemplateError::InvalidGroupName {
                name: name.to_string(),
                offset,
            });
    }

    let valid = name
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(Segment::Named(name.to_string()))
    } else {
        Err(TemplateError::InvalidGroupName {
            name: name.to_string(),
            offset,
        })
    }
}
