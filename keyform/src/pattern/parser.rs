//! Template scanner producing syntactic parts.
//!
//! The scanner only checks structure. Identifier splitting, regex defaults and
//! duplicate detection happen when the parts are assembled into a
//! [`CompiledPattern`](super::CompiledPattern).

use crate::error::{KeyformError, KeyformResult};

/// One syntactic unit of a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct RawPart {
    /// Character offset of the first character of `source`.
    pub(super) position: usize,
    /// Exact template text of the unit.
    pub(super) source: String,
    pub(super) kind: RawKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum RawKind {
    Literal(String),
    Capture {
        required: bool,
        prefix: String,
        identifier: String,
        regex: Option<String>,
        postfix: String,
    },
}

fn is_escapable(ch: char) -> bool {
    matches!(
        ch,
        '*' | '+' | '?' | '|' | '{' | '[' | '(' | ')' | '<' | '>' | '^' | '$' | '.' | '#' | '\\'
            | '}' | ']'
    ) || ch.is_whitespace()
}

/// Splits `pattern` into literal runs and capture units.
///
/// # Errors
///
/// Returns [`KeyformError::PatternSyntax`] for stray or mismatched brackets,
/// nested openers, unterminated units or inline regexes, missing
/// identifiers, repeated inline regexes and invalid escapes.
pub(super) fn scan(pattern: &str) -> KeyformResult<Vec<RawPart>> {
    Scanner {
        pattern,
        chars: pattern.chars().collect(),
        pos: 0,
    }
    .run()
}

struct Scanner<'a> {
    pattern: &'a str,
    chars: Vec<char>,
    pos: usize,
}

impl Scanner<'_> {
    fn run(mut self) -> KeyformResult<Vec<RawPart>> {
        let mut parts = Vec::new();
        let mut literal = String::new();
        let mut literal_start = 0;
        while let Some(&ch) = self.chars.get(self.pos) {
            match ch {
                '{' | '[' => {
                    self.flush_literal(&mut parts, &mut literal, literal_start);
                    parts.push(self.unit(ch)?);
                    literal_start = self.pos;
                }
                '}' | ']' => {
                    return Err(self.error(self.pos, 1, format!("unmatched '{ch}'")));
                }
                '\\' => literal.push(self.escape()?),
                _ => {
                    literal.push(ch);
                    self.pos += 1;
                }
            }
        }
        self.flush_literal(&mut parts, &mut literal, literal_start);
        Ok(parts)
    }

    fn flush_literal(&self, parts: &mut Vec<RawPart>, literal: &mut String, start: usize) {
        if self.pos == start {
            return;
        }
        parts.push(RawPart {
            position: start,
            source: self.slice(start, self.pos),
            kind: RawKind::Literal(std::mem::take(literal)),
        });
    }

    fn unit(&mut self, opener: char) -> KeyformResult<RawPart> {
        let start = self.pos;
        let required = opener == '[';
        let closer = if required { ']' } else { '}' };
        self.pos += 1;

        let prefix = self.separator(start, false)?;
        let ident_start = self.pos;
        while self
            .chars
            .get(self.pos)
            .is_some_and(|ch| ch.is_ascii_alphanumeric() || *ch == '_')
        {
            self.pos += 1;
        }
        if self.pos == ident_start {
            return Err(self.error(start, self.pos + 1 - start, "missing identifier"));
        }
        let identifier = self.slice(ident_start, self.pos);

        let mut regex = self.inline_regex()?;
        let postfix = self.separator(start, true)?;
        if self.chars.get(self.pos) == Some(&'<') {
            let regex_start = self.pos;
            if regex.is_some() {
                return Err(self.error(regex_start, 1, "more than one inline regex"));
            }
            regex = self.inline_regex()?;
        }

        match self.chars.get(self.pos).copied() {
            Some(ch) if ch == closer => self.pos += 1,
            Some(ch @ ('}' | ']')) => {
                return Err(self.error(
                    self.pos,
                    1,
                    format!("'{opener}' closed by '{ch}'"),
                ));
            }
            _ => return Err(self.unterminated(start)),
        }

        Ok(RawPart {
            position: start,
            source: self.slice(start, self.pos),
            kind: RawKind::Capture {
                required,
                prefix,
                identifier,
                regex,
                postfix,
            },
        })
    }

    /// Reads separator text. A prefix stops at the first ASCII letter, so
    /// digits and underscores before it belong to the prefix (`{1Key}` has
    /// prefix `1`); identifiers therefore always start with a letter. A postfix
    /// may contain letters. Both stop at a closer or an inline regex.
    fn separator(&mut self, unit_start: usize, postfix: bool) -> KeyformResult<String> {
        let mut text = String::new();
        loop {
            match self.chars.get(self.pos).copied() {
                None => return Err(self.unterminated(unit_start)),
                Some('{' | '[') => {
                    return Err(self.error(self.pos, 1, "nested part opener"));
                }
                Some('}' | ']' | '<') => break,
                Some('\\') => text.push(self.escape()?),
                Some(ch) if !postfix && ch.is_ascii_alphabetic() => break,
                Some(ch) => {
                    text.push(ch);
                    self.pos += 1;
                }
            }
        }
        Ok(text)
    }

    /// Reads `<...>` if present. `\>` yields `>`; other escapes are kept for
    /// the regex engine.
    fn inline_regex(&mut self) -> KeyformResult<Option<String>> {
        if self.chars.get(self.pos) != Some(&'<') {
            return Ok(None);
        }
        let open = self.pos;
        self.pos += 1;
        let mut source = String::new();
        loop {
            match self.chars.get(self.pos).copied() {
                None => break,
                Some('>') => {
                    self.pos += 1;
                    return Ok(Some(source));
                }
                Some('\\') => {
                    let Some(next) = self.chars.get(self.pos + 1).copied() else {
                        break;
                    };
                    if next != '>' {
                        source.push('\\');
                    }
                    source.push(next);
                    self.pos += 2;
                }
                Some(ch) => {
                    source.push(ch);
                    self.pos += 1;
                }
            }
        }
        Err(self.error(
            open,
            self.chars.len() - open,
            "unterminated inline regex",
        ))
    }

    fn escape(&mut self) -> KeyformResult<char> {
        match self.chars.get(self.pos + 1).copied() {
            None => Err(self.error(self.pos, 1, "dangling escape character")),
            Some(ch) if is_escapable(ch) => {
                self.pos += 2;
                Ok(ch)
            }
            Some(_) => Err(self.error(self.pos, 2, "unknown escape sequence")),
        }
    }

    fn unterminated(&self, start: usize) -> KeyformError {
        self.error(start, self.chars.len() - start, "unterminated part")
    }

    fn error(&self, position: usize, len: usize, message: impl Into<String>) -> KeyformError {
        KeyformError::pattern_syntax(
            self.pattern,
            position,
            self.slice(position, position + len),
            message,
        )
    }

    fn slice(&self, start: usize, end: usize) -> String {
        self.chars
            .get(start..end.min(self.chars.len()))
            .map(|chars| chars.iter().collect())
            .unwrap_or_default()
    }
}
