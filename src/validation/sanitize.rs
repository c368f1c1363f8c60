//! Sanitize-then-validate for user bodies
//!
//! 1. Required fields: `nome` non-blank string, `idade` integer-like and
//!    non-zero, `email` non-empty string.
//! 2. Text fields (`nome`, `endereco`, `email`) are trimmed, stripped of
//!    `" ' ? : =` and of SQL keywords, then trimmed again.
//! 3. `nome` and `email` must still be non-empty after step 2.
//!
//! Keys other than the typed fields pass through untouched.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::{Map, Value};

use crate::record::{NewRecord, RecordPatch, FIELD_KEYS};

use super::errors::ValidationError;

const FORBIDDEN_CHARS: [char; 5] = ['"', '\'', '?', ':', '='];

static FORBIDDEN_WORDS: OnceLock<Regex> = OnceLock::new();

fn forbidden_words() -> &'static Regex {
    FORBIDDEN_WORDS.get_or_init(|| {
        Regex::new(r"(?i)\b(SELECT|UPDATE|DELETE|ORDER BY|FROM|WHERE|CREATE|TABLE|DATABASE)\b")
            .expect("keyword pattern is valid")
    })
}

/// Strip forbidden characters and SQL keywords from one text value.
pub fn sanitize_text(value: &str) -> String {
    let without_chars: String = value
        .trim()
        .chars()
        .filter(|c| !FORBIDDEN_CHARS.contains(c))
        .collect();
    forbidden_words()
        .replace_all(&without_chars, "")
        .trim()
        .to_string()
}

/// Leading-integer parse: `30`, `30.9`, `"30"`, `" 30 anos"` all give 30.
pub fn parse_age(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(s) => {
            let s = s.trim_start();
            let (sign, digits) = match s.strip_prefix('-') {
                Some(rest) => (-1, rest),
                None => (1, s.strip_prefix('+').unwrap_or(s)),
            };
            let end = digits
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(digits.len());
            digits[..end].parse::<i64>().ok().map(|n| sign * n)
        }
        _ => None,
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64() != Some(0.0),
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

fn as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[derive(Debug, Default)]
struct Fields {
    name: Option<String>,
    age: Option<i64>,
    address: Option<String>,
    email: Option<String>,
    extra: Map<String, Value>,
}

/// Shared rules. With `required`, absent `nome`/`idade`/`email` are errors;
/// otherwise absent (or null) fields are left out.
fn collect(body: &Value, required: bool) -> Result<Fields, ValidationError> {
    let obj = body.as_object().ok_or_else(|| {
        ValidationError::invalid(vec!["request body must be a JSON object".to_string()])
    })?;
    let present = |key: &str| obj.get(key).filter(|v| required || !v.is_null());

    let mut errors = Vec::new();
    let mut fields = Fields::default();

    match present("nome") {
        Some(Value::String(s)) if !s.trim().is_empty() => fields.name = Some(sanitize_text(s)),
        None if !required => {}
        _ => errors.push(r#"field "nome" is required"#.to_string()),
    }
    match present("idade") {
        Some(v) if is_truthy(v) && parse_age(v).is_some() => fields.age = parse_age(v),
        None if !required => {}
        _ => errors.push(r#"field "idade" must be a valid number"#.to_string()),
    }
    match present("email") {
        Some(Value::String(s)) if !s.is_empty() => fields.email = Some(sanitize_text(s)),
        None if !required => {}
        _ => errors.push(r#"field "email" is required"#.to_string()),
    }
    if !errors.is_empty() {
        return Err(ValidationError::invalid(errors));
    }

    if let Some(address) = obj.get("endereco").filter(|v| is_truthy(v)) {
        fields.address = Some(sanitize_text(&as_text(address)));
    }

    if fields.name.as_deref() == Some("") {
        errors.push(r#"field "nome" became empty after sanitization"#.to_string());
    }
    if fields.email.as_deref() == Some("") {
        errors.push(r#"field "email" became empty after sanitization"#.to_string());
    }
    if !errors.is_empty() {
        return Err(ValidationError::invalid_after_sanitize(errors));
    }

    fields.extra = obj
        .iter()
        .filter(|(k, _)| !FIELD_KEYS.contains(&k.as_str()))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();

    Ok(fields)
}

/// Validate and clean a create body.
pub fn sanitize_and_validate(body: &Value) -> Result<NewRecord, ValidationError> {
    let fields = collect(body, true)?;
    match (fields.name, fields.age, fields.email) {
        (Some(name), Some(age), Some(email)) => Ok(NewRecord {
            name,
            age,
            address: fields.address,
            email,
            extra: fields.extra,
        }),
        _ => Err(ValidationError::invalid(vec![
            "missing required fields".to_string(),
        ])),
    }
}

/// Validate and clean an update body. Only supplied fields are checked.
pub fn sanitize_patch(body: &Value) -> Result<RecordPatch, ValidationError> {
    let fields = collect(body, false)?;
    Ok(RecordPatch {
        name: fields.name,
        age: fields.age,
        address: fields.address,
        email: fields.email,
        extra: fields.extra,
    })
}
