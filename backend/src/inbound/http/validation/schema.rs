//! Declarative field rules and the pure function that checks a JSON object
//! against them.
//!
//! A [`Schema`] is plain data: an ordered list of [`FieldRule`]s, each with a
//! kind, a presence flag, and constraints. Schemas are `const`-constructible
//! so the registry can define them as statics.

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Number, Value};
use url::Url;

/// Name reported when the input as a whole is rejected.
pub const ROOT_FIELD: &str = "value";

/// Largest magnitude an integer field accepts (2^53 - 1).
const MAX_SAFE_INTEGER: i64 = 9_007_199_254_740_991;

/// Shape a field value must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Whole number; numeric strings are accepted and converted.
    Integer,
    /// UTF-8 string.
    Text,
}

/// Whether a field must be present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Required,
    Optional,
}

/// A single constraint applied after the kind check succeeds.
///
/// Integer constraints are ignored on text fields and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    /// Integer strictly greater than zero.
    Positive,
    /// Integer greater than or equal to the bound.
    AtLeast(i64),
    /// Text with at least this many characters.
    MinLength(usize),
    /// Text with at most this many characters.
    MaxLength(usize),
    /// Text made of ASCII letters and digits only.
    Alphanumeric,
    /// Text that parses as an absolute URI.
    AbsoluteUri,
}

/// Machine-readable violation category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationCode {
    MissingField,
    UnknownField,
    InvalidType,
    NotInteger,
    UnsafeNumber,
    NotPositive,
    BelowMinimum,
    EmptyText,
    TooShort,
    TooLong,
    NotAlphanumeric,
    InvalidUri,
    MalformedInput,
}

impl ViolationCode {
    /// Snake-case identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::UnknownField => "unknown_field",
            Self::InvalidType => "invalid_type",
            Self::NotInteger => "not_integer",
            Self::UnsafeNumber => "unsafe_number",
            Self::NotPositive => "not_positive",
            Self::BelowMinimum => "below_minimum",
            Self::EmptyText => "empty_text",
            Self::TooShort => "too_short",
            Self::TooLong => "too_long",
            Self::NotAlphanumeric => "not_alphanumeric",
            Self::InvalidUri => "invalid_uri",
            Self::MalformedInput => "malformed_input",
        }
    }
}

impl fmt::Display for ViolationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One broken rule on one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    field: String,
    code: ViolationCode,
    message: String,
}

impl Violation {
    /// Build a violation for `field`.
    pub fn new(field: impl Into<String>, code: ViolationCode, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            code,
            message: message.into(),
        }
    }

    /// Field path the violation applies to.
    pub fn field(&self) -> &str {
        self.field.as_str()
    }

    /// Violation category.
    pub fn code(&self) -> ViolationCode {
        self.code
    }

    /// Human-readable explanation.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }
}

/// Rule for one named field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    name: &'static str,
    kind: FieldKind,
    presence: Presence,
    constraints: &'static [Constraint],
}

impl FieldRule {
    /// Optional integer field.
    pub const fn integer(name: &'static str, constraints: &'static [Constraint]) -> Self {
        Self {
            name,
            kind: FieldKind::Integer,
            presence: Presence::Optional,
            constraints,
        }
    }

    /// Optional text field.
    pub const fn text(name: &'static str, constraints: &'static [Constraint]) -> Self {
        Self {
            name,
            kind: FieldKind::Text,
            presence: Presence::Optional,
            constraints,
        }
    }

    /// Same rule, but the field must be present.
    pub const fn required(self) -> Self {
        Self {
            presence: Presence::Required,
            ..self
        }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub const fn presence(&self) -> Presence {
        self.presence
    }

    /// Same kind and constraints, regardless of presence.
    #[cfg(test)]
    pub(crate) fn same_shape(&self, other: &Self) -> bool {
        self.name == other.name && self.kind == other.kind && self.constraints == other.constraints
    }

    fn check(&self, raw: &Value) -> Result<Value, Vec<Violation>> {
        match self.kind {
            FieldKind::Integer => self.check_integer(raw),
            FieldKind::Text => self.check_text(raw),
        }
    }

    fn violation(&self, code: ViolationCode, detail: impl fmt::Display) -> Violation {
        Violation::new(self.name, code, format!("\"{}\" {detail}", self.name))
    }

    fn check_integer(&self, raw: &Value) -> Result<Value, Vec<Violation>> {
        let number = match read_integer(raw) {
            NumberShape::Integer(number) => number,
            NumberShape::Fraction => {
                return Err(vec![self.violation(ViolationCode::NotInteger, "must be an integer")]);
            }
            NumberShape::Unsafe => {
                return Err(vec![
                    self.violation(ViolationCode::UnsafeNumber, "must be a safe number"),
                ]);
            }
            NumberShape::NotNumber => {
                return Err(vec![self.violation(ViolationCode::InvalidType, "must be a number")]);
            }
        };

        let violations: Vec<Violation> = self
            .constraints
            .iter()
            .filter_map(|constraint| match *constraint {
                Constraint::Positive if number <= 0 => {
                    Some(self.violation(ViolationCode::NotPositive, "must be a positive number"))
                }
                Constraint::AtLeast(bound) if number < bound => Some(self.violation(
                    ViolationCode::BelowMinimum,
                    format_args!("must be greater than or equal to {bound}"),
                )),
                _ => None,
            })
            .collect();

        if violations.is_empty() {
            Ok(Value::Number(Number::from(number)))
        } else {
            Err(violations)
        }
    }

    fn check_text(&self, raw: &Value) -> Result<Value, Vec<Violation>> {
        let Some(text) = raw.as_str() else {
            return Err(vec![self.violation(ViolationCode::InvalidType, "must be a string")]);
        };
        if text.is_empty() {
            return Err(vec![
                self.violation(ViolationCode::EmptyText, "is not allowed to be empty"),
            ]);
        }

        let length = text.chars().count();
        let violations: Vec<Violation> = self
            .constraints
            .iter()
            .filter_map(|constraint| match *constraint {
                Constraint::MinLength(min) if length < min => Some(self.violation(
                    ViolationCode::TooShort,
                    format_args!("length must be at least {min} characters long"),
                )),
                Constraint::MaxLength(max) if length > max => Some(self.violation(
                    ViolationCode::TooLong,
                    format_args!("length must be less than or equal to {max} characters long"),
                )),
                Constraint::Alphanumeric if !text.chars().all(|c| c.is_ascii_alphanumeric()) => {
                    Some(self.violation(
                        ViolationCode::NotAlphanumeric,
                        "must only contain alpha-numeric characters",
                    ))
                }
                Constraint::AbsoluteUri if Url::parse(text).is_err() => {
                    Some(self.violation(ViolationCode::InvalidUri, "must be a valid uri"))
                }
                _ => None,
            })
            .collect();

        if violations.is_empty() {
            Ok(Value::String(text.to_owned()))
        } else {
            Err(violations)
        }
    }
}

enum NumberShape {
    Integer(i64),
    Fraction,
    Unsafe,
    NotNumber,
}

fn read_integer(raw: &Value) -> NumberShape {
    match raw {
        Value::Number(number) => match number.as_i64() {
            Some(value) => bounded(value),
            None => number.as_f64().map_or(NumberShape::NotNumber, read_float),
        },
        Value::String(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                NumberShape::NotNumber
            } else if let Ok(value) = trimmed.parse::<i64>() {
                bounded(value)
            } else {
                trimmed
                    .parse::<f64>()
                    .map_or(NumberShape::NotNumber, read_float)
            }
        }
        _ => NumberShape::NotNumber,
    }
}

fn bounded(value: i64) -> NumberShape {
    if (-MAX_SAFE_INTEGER..=MAX_SAFE_INTEGER).contains(&value) {
        NumberShape::Integer(value)
    } else {
        NumberShape::Unsafe
    }
}

fn read_float(value: f64) -> NumberShape {
    if !value.is_finite() {
        NumberShape::NotNumber
    } else if value.fract() != 0.0 {
        NumberShape::Fraction
    } else if value.abs() > MAX_SAFE_INTEGER as f64 {
        NumberShape::Unsafe
    } else {
        NumberShape::Integer(value as i64)
    }
}

/// Named, immutable rule set for one request part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schema {
    name: &'static str,
    fields: &'static [FieldRule],
}

impl Schema {
    /// Define a schema. Field order fixes the order violations are reported in.
    pub const fn new(name: &'static str, fields: &'static [FieldRule]) -> Self {
        Self { name, fields }
    }

    /// Registry name, e.g. `product.create`.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub const fn fields(&self) -> &'static [FieldRule] {
        self.fields
    }

    /// Rule for `name`, if the schema declares one.
    pub fn field(&self, name: &str) -> Option<&'static FieldRule> {
        self.fields.iter().find(|rule| rule.name == name)
    }

    /// Check `input` against every rule.
    ///
    /// Returns a new object holding only the declared fields, with integer
    /// fields normalised to JSON numbers. On rejection every violation is
    /// reported: rule failures in declaration order, then unknown fields in
    /// key order.
    ///
    /// # Examples
    /// ```
    /// use serde_json::json;
    /// use store_backend::inbound::http::validation::{Constraint, FieldRule, Schema};
    ///
    /// static IDENTIFY: Schema = Schema::new(
    ///     "thing.identify",
    ///     &[FieldRule::integer("id", &[Constraint::Positive]).required()],
    /// );
    ///
    /// assert_eq!(IDENTIFY.check(&json!({ "id": "7" })), Ok(json!({ "id": 7 })));
    /// assert!(IDENTIFY.check(&json!({ "id": -1 })).is_err());
    /// ```
    pub fn check(&self, input: &Value) -> Result<Value, Vec<Violation>> {
        let Some(object) = input.as_object() else {
            return Err(vec![Violation::new(
                ROOT_FIELD,
                ViolationCode::InvalidType,
                format!("\"{ROOT_FIELD}\" must be of type object"),
            )]);
        };

        let mut accepted = Map::new();
        let mut violations = Vec::new();
        for rule in self.fields {
            match object.get(rule.name) {
                None if rule.presence == Presence::Required => {
                    violations.push(rule.violation(ViolationCode::MissingField, "is required"));
                }
                None => {}
                Some(raw) => match rule.check(raw) {
                    Ok(value) => {
                        accepted.insert(rule.name.to_owned(), value);
                    }
                    Err(mut found) => violations.append(&mut found),
                },
            }
        }

        violations.extend(
            object
                .keys()
                .filter(|key| self.field(key).is_none())
                .map(|key| {
                    Violation::new(
                        key.as_str(),
                        ViolationCode::UnknownField,
                        format!("\"{key}\" is not allowed"),
                    )
                }),
        );

        if violations.is_empty() {
            Ok(Value::Object(accepted))
        } else {
            Err(violations)
        }
    }
}
