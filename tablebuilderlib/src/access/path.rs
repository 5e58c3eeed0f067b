//! Path expressions: chained attribute and item lookups.
//!
//! A [`Path`] is an immutable sequence of [`Step`]s. Paths are built either
//! fluently:
//!
//! ```rust
//! use tablebuilderlib::Path;
//!
//! let path = Path::root().attr("cart").attr("items").index(0).item("price");
//! assert_eq!(path.to_string(), "cart.items[0][\"price\"]");
//! ```
//!
//! or parsed from the same textual form with [`Path::parse`]. Attribute
//! names that are not plain identifiers are quoted (`meta."a.b"`), and
//! string keys use `\\`, `\"`, `\n`, `\t`, `\r` and `\u{..}` escapes, so
//! `Display` output always parses back to the same path.

use std::str::FromStr;

use serde_json::Value;

use super::lookup::{write_quoted, Key, Lookup};
use crate::error::TableError;
use crate::Result;

/// One lookup in a path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Step {
    /// Attribute lookup (`.name`)
    Attr(String),
    /// Item lookup by key or index (`["name"]`, `[0]`)
    Item(Key),
}

impl Step {
    /// Apply this step to a target. `None` if the lookup misses.
    pub fn apply<L: Lookup + ?Sized>(&self, target: &L) -> Option<Value> {
        match self {
            Step::Attr(name) => target.attr(name),
            Step::Item(key) => target.item(key),
        }
    }
}

/// A chain of lookup steps. The empty path resolves to the record itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path {
    steps: Vec<Step>,
}

impl Path {
    /// The empty path (identity).
    pub fn root() -> Self {
        Self::default()
    }

    /// Append an attribute step.
    pub fn attr(self, name: impl Into<String>) -> Self {
        self.step(Step::Attr(name.into()))
    }

    /// Append an item step.
    pub fn item(self, key: impl Into<Key>) -> Self {
        self.step(Step::Item(key.into()))
    }

    /// Append an index step.
    pub fn index(self, index: i64) -> Self {
        self.step(Step::Item(Key::Index(index)))
    }

    fn step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    /// The steps in application order.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Whether this is the identity path.
    pub fn is_root(&self) -> bool {
        self.steps.is_empty()
    }

    /// Walk the path. Any missing step fails the whole resolution.
    pub fn resolve<R: Lookup + ?Sized>(&self, record: &R) -> Option<Value> {
        let mut steps = self.steps.iter();
        let Some(first) = steps.next() else {
            return Some(record.to_value());
        };
        let mut current = first.apply(record)?;
        for step in steps {
            current = step.apply(&current)?;
        }
        Some(current)
    }

    /// Parse a path expression such as `user.address["street"]` or `rows[-1].id`.
    pub fn parse(expr: &str) -> Result<Self> {
        PathParser::new(expr).parse()
    }
}

impl FromStr for Path {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self> {
        Path::parse(s)
    }
}

impl std::fmt::Display for Path {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            match step {
                Step::Attr(name) => {
                    if i > 0 {
                        f.write_str(".")?;
                    }
                    if is_plain_name(name) {
                        f.write_str(name)?;
                    } else {
                        write_quoted(f, name)?;
                    }
                }
                Step::Item(key) => write!(f, "[{}]", key)?,
            }
        }
        Ok(())
    }
}

/// Attribute names written bare; anything else is quoted (`."a.b"`).
fn is_plain_name(name: &str) -> bool {
    !name.is_empty()
        && name.chars().all(|c| {
            !matches!(c, '.' | '[' | ']' | '"' | '\'' | '\\')
                && !c.is_whitespace()
                && !c.is_control()
        })
}

struct PathParser<'a> {
    expr: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
}

impl<'a> PathParser<'a> {
    fn new(expr: &'a str) -> Self {
        Self {
            expr,
            chars: expr.char_indices().peekable(),
        }
    }

    fn error(&self, message: impl Into<String>) -> TableError {
        TableError::InvalidPath {
            expr: self.expr.to_string(),
            message: message.into(),
        }
    }

    fn parse(mut self) -> Result<Path> {
        let mut path = Path::root();
        let mut first = true;

        while let Some(&(pos, c)) = self.chars.peek() {
            path = match c {
                '.' => {
                    self.chars.next();
                    let name = self.attr_name()?;
                    path.attr(name)
                }
                '[' => {
                    self.chars.next();
                    let key = self.bracket()?;
                    path.item(key)
                }
                _ if first => {
                    let name = self.attr_name()?;
                    path.attr(name)
                }
                _ => return Err(self.error(format!("unexpected '{}' at offset {}", c, pos))),
            };
            first = false;
        }

        Ok(path)
    }

    /// A bare identifier, or a quoted name such as `"a.b"`.
    fn attr_name(&mut self) -> Result<String> {
        match self.chars.peek() {
            Some(&(_, quote @ ('"' | '\''))) => {
                self.chars.next();
                self.quoted(quote)
            }
            _ => self.ident(),
        }
    }

    fn ident(&mut self) -> Result<String> {
        let mut name = String::new();
        while let Some(&(pos, c)) = self.chars.peek() {
            match c {
                '.' | '[' => break,
                ']' | '"' | '\'' => {
                    return Err(self.error(format!("unexpected '{}' at offset {}", c, pos)))
                }
                _ => {
                    name.push(c);
                    self.chars.next();
                }
            }
        }
        if name.is_empty() {
            return Err(self.error("empty attribute name"));
        }
        Ok(name)
    }

    fn bracket(&mut self) -> Result<Key> {
        self.skip_whitespace();
        let key = match self.chars.peek() {
            Some(&(_, quote @ ('"' | '\''))) => {
                self.chars.next();
                Key::Name(self.quoted(quote)?)
            }
            Some(_) => {
                let mut raw = String::new();
                while let Some(&(_, c)) = self.chars.peek() {
                    if c == ']' {
                        break;
                    }
                    raw.push(c);
                    self.chars.next();
                }
                let raw = raw.trim();
                let index = raw
                    .parse::<i64>()
                    .map_err(|_| self.error(format!("'{}' is not an integer index", raw)))?;
                Key::Index(index)
            }
            None => return Err(self.error("unterminated '['")),
        };
        self.skip_whitespace();
        match self.chars.next() {
            Some((_, ']')) => Ok(key),
            Some((pos, c)) => Err(self.error(format!("expected ']' at offset {}, found '{}'", pos, c))),
            None => Err(self.error("unterminated '['")),
        }
    }

    fn quoted(&mut self, quote: char) -> Result<String> {
        let mut value = String::new();
        while let Some((_, c)) = self.chars.next() {
            match c {
                '\\' => match self.chars.next() {
                    Some((_, 'n')) => value.push('\n'),
                    Some((_, 't')) => value.push('\t'),
                    Some((_, 'r')) => value.push('\r'),
                    Some((pos, 'u')) => value.push(self.unicode_escape(pos)?),
                    Some((_, escaped)) => value.push(escaped),
                    None => break,
                },
                c if c == quote => return Ok(value),
                c => value.push(c),
            }
        }
        Err(self.error("unterminated string key"))
    }

    /// The `{hex}` part of a `\u{..}` escape.
    fn unicode_escape(&mut self, pos: usize) -> Result<char> {
        if !matches!(self.chars.next(), Some((_, '{'))) {
            return Err(self.error(format!("expected '{{' after \\u at offset {}", pos)));
        }
        let mut hex = String::new();
        loop {
            match self.chars.next() {
                Some((_, '}')) => break,
                Some((_, c)) if c.is_ascii_hexdigit() && hex.len() < 6 => hex.push(c),
                _ => return Err(self.error(format!("bad unicode escape at offset {}", pos))),
            }
        }
        u32::from_str_radix(&hex, 16)
            .ok()
            .and_then(char::from_u32)
            .ok_or_else(|| self.error(format!("bad unicode escape at offset {}", pos)))
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.chars.peek(), Some(&(_, c)) if c.is_whitespace()) {
            self.chars.next();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder_records_steps() {
        let path = Path::root().attr("a").item("b").index(-1);
        assert_eq!(
            path.steps(),
            &[
                Step::Attr("a".to_string()),
                Step::Item(Key::Name("b".to_string())),
                Step::Item(Key::Index(-1)),
            ]
        );
    }

    #[test]
    fn test_builder_leaves_original_untouched() {
        let base = Path::root().attr("user");
        let street = base.clone().attr("street");
        assert_eq!(base.steps().len(), 1);
        assert_eq!(street.steps().len(), 2);
    }

    #[test]
    fn test_resolve_nested() {
        let record = json!({"a": {"b": 1}});
        assert_eq!(
            Path::root().item("a").item("b").resolve(&record),
            Some(json!(1))
        );
        assert_eq!(
            Path::root().attr("a").attr("b").resolve(&record),
            Some(json!(1))
        );
    }

    #[test]
    fn test_resolve_any_miss_fails_whole_path() {
        let record = json!({"a": {"b": 1}});
        assert_eq!(Path::root().attr("a").attr("c").resolve(&record), None);
        assert_eq!(Path::root().attr("x").attr("b").resolve(&record), None);
        assert_eq!(Path::root().attr("a").attr("b").attr("c").resolve(&record), None);
    }

    #[test]
    fn test_root_is_identity() {
        let record = json!(12);
        assert_eq!(Path::root().resolve(&record), Some(json!(12)));
        assert!(Path::root().is_root());
    }

    #[test]
    fn test_index_into_tuple_like() {
        let record = json!(["foo", "bar"]);
        assert_eq!(Path::root().index(1).resolve(&record), Some(json!("bar")));
    }

    #[test]
    fn test_parse_mixed() {
        let path = Path::parse("cart.items[0][\"price\"]").unwrap();
        assert_eq!(
            path,
            Path::root().attr("cart").attr("items").index(0).item("price")
        );
    }

    #[test]
    fn test_parse_leading_bracket_and_dot() {
        assert_eq!(
            Path::parse("['a'].b").unwrap(),
            Path::root().item("a").attr("b")
        );
        assert_eq!(Path::parse(".a").unwrap(), Path::root().attr("a"));
        assert_eq!(Path::parse("[ -2 ]").unwrap(), Path::root().index(-2));
    }

    #[test]
    fn test_parse_empty_is_root() {
        assert!(Path::parse("").unwrap().is_root());
    }

    #[test]
    fn test_parse_errors() {
        for expr in ["a..b", "a[", "a[x]", "a[\"x]", "a]b", "a[0", "a[0]b"] {
            let err = Path::parse(expr).unwrap_err();
            assert!(
                matches!(err, TableError::InvalidPath { .. }),
                "expected InvalidPath for {expr}"
            );
        }
    }

    #[test]
    fn test_display_parses_back() {
        let path = Path::root()
            .attr("user")
            .item("home address")
            .index(3)
            .attr("zip");
        let text = path.to_string();
        assert_eq!(text, "user[\"home address\"][3].zip");
        assert_eq!(text.parse::<Path>().unwrap(), path);

        let awkward = [
            Path::root().attr("a.b"),
            Path::root().attr("x").attr("[0]").attr("it's"),
            Path::root().attr("").attr("two words"),
            Path::root().item("x\ry"),
            Path::root().item("a\u{1b}b").item("tab\there"),
            Path::root().item("q\"uote\\slash").attr("é"),
        ];
        for path in awkward {
            let text = path.to_string();
            assert_eq!(Path::parse(&text).unwrap(), path, "round trip of {text}");
        }
        assert_eq!(Path::root().attr("a.b").attr("c").to_string(), "\"a.b\".c");
        assert_eq!(Path::root().attr("c").attr("a.b").to_string(), "c.\"a.b\"");
    }

    #[test]
    fn test_parse_escapes() {
        assert_eq!(
            Path::parse(r#"["\u{41}\r"]"#).unwrap(),
            Path::root().item("A\r")
        );
        assert_eq!(Path::parse(r#"'q'.'r s'"#).unwrap(), Path::root().attr("q").attr("r s"));
        for expr in [r#"["\u41"]"#, r#"["\u{zz}"]"#, r#"["\u{d800}"]"#, r#"."open"#] {
            assert!(Path::parse(expr).is_err(), "expected error for {expr}");
        }
    }
}
