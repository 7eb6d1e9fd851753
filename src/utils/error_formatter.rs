//! Normalization of validation and persistence errors into user-facing strings.
//!
//! Errors reach the API boundary in three shapes, captured by [`ErrorDetail`]:
//! per-field messages, a flat list of messages, or a single message. Individual
//! messages may themselves carry wrapped representations produced by upstream
//! systems (`ErrorDetail(string='…', code='…')`, or a stringified
//! `{'field': ['message']}` mapping); [`format_error`] unwraps those as well.
//!
//! Formatting never fails: anything that cannot be interpreted is returned as-is.

use literal::Literal;
use regex::Regex;
use std::sync::LazyLock;
use validator::{ValidationError, ValidationErrors};

/// Message emitted by validators for a missing mandatory field.
pub const REQUIRED_MESSAGE: &str = "This field is required.";

static WRAPPED_DETAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"ErrorDetail\(string='(.+?)', code='(.+?)'\)").unwrap());

/// Structured error payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorDetail {
    /// Messages keyed by the field they refer to, rendered in this order.
    Fields(Vec<(String, Vec<String>)>),
    /// Messages not tied to any field.
    List(Vec<String>),
    /// A single free-form message.
    Scalar(String),
}

impl ErrorDetail {
    /// Builds a [`ErrorDetail::Fields`] holding one message for one field.
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Fields(vec![(field.into(), vec![message.into()])])
    }

    /// Converts validator failures, listing fields in `field_order` first
    /// and any others after them alphabetically.
    pub fn from_validation_errors(errors: &ValidationErrors, field_order: &[&str]) -> Self {
        let mut fields: Vec<(String, Vec<String>)> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                (
                    field.to_string(),
                    errs.iter().map(validation_message).collect(),
                )
            })
            .collect();

        if fields.is_empty() {
            return Self::Scalar(errors.to_string());
        }

        fields.sort_by(|(a, _), (b, _)| {
            let rank = |f: &str| field_order.iter().position(|o| *o == f).unwrap_or(usize::MAX);
            rank(a).cmp(&rank(b)).then_with(|| a.cmp(b))
        });
        Self::Fields(fields)
    }
}

impl From<String> for ErrorDetail {
    fn from(message: String) -> Self {
        Self::Scalar(message)
    }
}

impl From<&str> for ErrorDetail {
    fn from(message: &str) -> Self {
        Self::Scalar(message.to_string())
    }
}

impl From<&ValidationErrors> for ErrorDetail {
    fn from(errors: &ValidationErrors) -> Self {
        Self::from_validation_errors(errors, &[])
    }
}

/// Resolves the message of a single validator failure, falling back to a
/// message derived from its code.
fn validation_message(error: &ValidationError) -> String {
    if let Some(message) = &error.message {
        return message.to_string();
    }

    match error.code.as_ref() {
        "required" => REQUIRED_MESSAGE.to_string(),
        "email" => "Enter a valid email address.".to_string(),
        "url" => "Enter a valid URL.".to_string(),
        "length" => "Ensure this field has a valid length.".to_string(),
        "range" => "Ensure this value is within the allowed range.".to_string(),
        code => format!("Invalid value ({code})."),
    }
}

/// Renders an [`ErrorDetail`] as a single human-readable string.
///
/// # Examples
///
/// ```
/// use records_api::utils::error_formatter::{ErrorDetail, format_error};
///
/// let detail = ErrorDetail::field("email", "This field is required.");
/// assert_eq!(format_error(&detail), "email is required");
/// ```
pub fn format_error(detail: &ErrorDetail) -> String {
    match detail {
        ErrorDetail::Fields(fields) => fields
            .iter()
            .flat_map(|(field, messages)| messages.iter().map(move |m| field_message(field, m)))
            .collect::<Vec<_>>()
            .join(", "),
        ErrorDetail::List(messages) => messages
            .iter()
            .map(|m| extract_message(m))
            .collect::<Vec<_>>()
            .join(", "),
        ErrorDetail::Scalar(message) => {
            if message.trim() == REQUIRED_MESSAGE {
                "A required field is missing".to_string()
            } else {
                extract_message(message)
            }
        }
    }
}

fn field_message(field: &str, message: &str) -> String {
    let text = extract_message(message);
    if text == REQUIRED_MESSAGE {
        format!("{field} is required")
    } else {
        format!("{field}: {text}")
    }
}

/// Unwraps upstream error representations embedded in a message.
fn extract_message(message: &str) -> String {
    if let Some(captures) = WRAPPED_DETAIL_REGEX.captures(message) {
        return captures[1].to_string();
    }

    if message.starts_with('{')
        && message.ends_with('}')
        && let Some(Literal::Dict(entries)) = literal::parse(message)
    {
        return entries
            .iter()
            .flat_map(|(key, value)| {
                let field = key.to_text();
                match value {
                    Literal::List(items) => items
                        .iter()
                        .map(|item| field_message(&field, &item.to_text()))
                        .collect::<Vec<_>>(),
                    other => vec![field_message(&field, &other.to_text())],
                }
            })
            .collect::<Vec<_>>()
            .join("; ");
    }

    message.to_string()
}

/// Minimal reader for Python-style literal reprs (`{'a': ['b', 1]}`).
mod literal {
    use std::iter::Peekable;
    use std::str::Chars;

    #[derive(Debug, Clone, PartialEq)]
    pub enum Literal {
        Str(String),
        /// Numbers, `None`, `True` and other unquoted tokens, kept verbatim.
        Bare(String),
        List(Vec<Literal>),
        Dict(Vec<(Literal, Literal)>),
    }

    impl Literal {
        /// Equivalent of `str(value)`: strings unquoted, containers as reprs.
        pub fn to_text(&self) -> String {
            match self {
                Literal::Str(s) | Literal::Bare(s) => s.clone(),
                container => container.to_repr(),
            }
        }

        fn to_repr(&self) -> String {
            match self {
                Literal::Str(s) => format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'")),
                Literal::Bare(s) => s.clone(),
                Literal::List(items) => format!(
                    "[{}]",
                    items
                        .iter()
                        .map(Literal::to_repr)
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
                Literal::Dict(entries) => format!(
                    "{{{}}}",
                    entries
                        .iter()
                        .map(|(k, v)| format!("{}: {}", k.to_repr(), v.to_repr()))
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
            }
        }
    }

    /// Deepest container nesting accepted before the parse gives up.
    const MAX_DEPTH: usize = 64;

    /// Parses a complete literal; trailing input or nesting deeper than
    /// [`MAX_DEPTH`] makes the parse fail.
    pub fn parse(input: &str) -> Option<Literal> {
        let mut parser = Parser {
            chars: input.chars().peekable(),
            depth: 0,
        };
        let value = parser.value()?;
        parser.skip_whitespace();
        parser.chars.peek().is_none().then_some(value)
    }

    struct Parser<'a> {
        chars: Peekable<Chars<'a>>,
        depth: usize,
    }

    impl Parser<'_> {
        fn skip_whitespace(&mut self) {
            while self.chars.peek().is_some_and(|c| c.is_whitespace()) {
                self.chars.next();
            }
        }

        fn value(&mut self) -> Option<Literal> {
            self.skip_whitespace();
            match *self.chars.peek()? {
                '\'' | '"' => self.string().map(Literal::Str),
                '[' => self.nested(|p| p.sequence(']').map(Literal::List)),
                '(' => self.nested(|p| p.sequence(')').map(Literal::List)),
                '{' => self.nested(Self::dict),
                _ => self.bare(),
            }
        }

        fn nested(&mut self, parse: impl FnOnce(&mut Self) -> Option<Literal>) -> Option<Literal> {
            if self.depth >= MAX_DEPTH {
                return None;
            }
            self.depth += 1;
            let value = parse(self);
            self.depth -= 1;
            value
        }

        fn string(&mut self) -> Option<String> {
            let quote = self.chars.next()?;
            let mut out = String::new();
            loop {
                match self.chars.next()? {
                    '\\' => match self.chars.next()? {
                        'n' => out.push('\n'),
                        't' => out.push('\t'),
                        'r' => out.push('\r'),
                        other => out.push(other),
                    },
                    c if c == quote => return Some(out),
                    c => out.push(c),
                }
            }
        }

        fn bare(&mut self) -> Option<Literal> {
            let mut token = String::new();
            while let Some(&c) = self.chars.peek() {
                if c.is_alphanumeric() || matches!(c, '.' | '-' | '+' | '_') {
                    token.push(c);
                    self.chars.next();
                } else {
                    break;
                }
            }
            (!token.is_empty()).then_some(Literal::Bare(token))
        }

        fn sequence(&mut self, close: char) -> Option<Vec<Literal>> {
            self.chars.next();
            let mut items = Vec::new();
            loop {
                self.skip_whitespace();
                if self.chars.peek() == Some(&close) {
                    self.chars.next();
                    return Some(items);
                }
                items.push(self.value()?);
                self.skip_whitespace();
                match self.chars.next()? {
                    ',' => continue,
                    c if c == close => return Some(items),
                    _ => return None,
                }
            }
        }

        fn dict(&mut self) -> Option<Literal> {
            self.chars.next();
            let mut entries = Vec::new();
            loop {
                self.skip_whitespace();
                if self.chars.peek() == Some(&'}') {
                    self.chars.next();
                    return Some(Literal::Dict(entries));
                }
                let key = self.value()?;
                self.skip_whitespace();
                if self.chars.next()? != ':' {
                    return None;
                }
                let value = self.value()?;
                entries.push((key, value));
                self.skip_whitespace();
                match self.chars.next()? {
                    ',' => continue,
                    '}' => return Some(Literal::Dict(entries)),
                    _ => return None,
                }
            }
        }
    }
}
