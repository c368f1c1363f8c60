//! Record types
//!
//! Persisted keys keep the wire names used by existing clients and data
//! files: `nome`, `idade`, `endereco`, `email`, `criadoEm`.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::validation::parse_age;

/// Keys owned by typed fields. Never allowed to appear among the extras.
pub const FIELD_KEYS: [&str; 6] = ["id", "nome", "idade", "endereco", "email", "criadoEm"];

/// A stored user record.
///
/// `id` and `created_at` are assigned by the store and never change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,

    #[serde(rename = "nome", default)]
    pub name: String,

    /// Older files may hold `"30"` instead of `30`; rewritten as a number.
    #[serde(rename = "idade", default, deserialize_with = "deserialize_stored_age")]
    pub age: i64,

    #[serde(rename = "endereco", default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(default)]
    pub email: String,

    /// Caller-supplied keys without a typed field, kept verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,

    #[serde(rename = "criadoEm")]
    pub created_at: String,
}

/// Input for creating a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRecord {
    #[serde(rename = "nome")]
    pub name: String,

    #[serde(rename = "idade")]
    pub age: i64,

    #[serde(rename = "endereco", default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    pub email: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NewRecord {
    pub fn new(name: impl Into<String>, age: i64, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            age,
            address: None,
            email: email.into(),
            extra: Map::new(),
        }
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Assemble the stored record with a fresh id and creation timestamp.
    pub fn into_record(self) -> Record {
        self.into_record_with(new_record_id(), now_timestamp())
    }

    pub fn into_record_with(self, id: String, created_at: String) -> Record {
        Record {
            id,
            name: self.name,
            age: self.age,
            address: self.address,
            email: self.email,
            extra: strip_field_keys(self.extra),
            created_at,
        }
    }
}

/// Partial update. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordPatch {
    #[serde(rename = "nome", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(rename = "idade", default, skip_serializing_if = "Option::is_none")]
    pub age: Option<i64>,

    #[serde(rename = "endereco", default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RecordPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn age(mut self, age: i64) -> Self {
        self.age = Some(age);
        self
    }

    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Merge this patch over `record`. `id` and `criadoEm` are never touched.
    pub fn apply_to(self, record: &mut Record) {
        if let Some(name) = self.name {
            record.name = name;
        }
        if let Some(age) = self.age {
            record.age = age;
        }
        if let Some(address) = self.address {
            record.address = Some(address);
        }
        if let Some(email) = self.email {
            record.email = email;
        }
        record.extra.extend(strip_field_keys(self.extra));
    }
}

impl From<NewRecord> for RecordPatch {
    fn from(input: NewRecord) -> Self {
        Self {
            name: Some(input.name),
            age: Some(input.age),
            address: input.address,
            email: Some(input.email),
            extra: input.extra,
        }
    }
}

/// Number or leading-integer string; anything else with no integer is 0.
fn deserialize_stored_age<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(parse_age(&value).unwrap_or(0))
}

fn strip_field_keys(mut extra: Map<String, Value>) -> Map<String, Value> {
    for key in FIELD_KEYS {
        extra.remove(key);
    }
    extra
}

/// Random UUID v4 token
pub fn new_record_id() -> String {
    Uuid::new_v4().to_string()
}

/// Current UTC time as ISO-8601 with millisecond precision, e.g. `2025-03-01T12:00:00.000Z`
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
