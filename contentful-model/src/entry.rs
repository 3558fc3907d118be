use crate::{FieldType, Link, Sys, Versioned};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An instance of a content type.
///
/// Entries have no fixed schema, so `fields` stays loosely typed: field id to
/// a map of locale code to value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(default)]
    pub sys: Sys,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl Entry {
    /// An unsaved entry of the given content type.
    pub fn new(content_type_id: impl Into<String>) -> Self {
        Self {
            sys: Sys {
                content_type: Some(Link::content_type(content_type_id)),
                ..Sys::default()
            },
            fields: Map::new(),
        }
    }

    pub fn content_type_id(&self) -> Option<&str> {
        self.sys.content_type_id()
    }

    /// Value of `field` for `locale`.
    pub fn get(&self, field: &str, locale: &str) -> Option<&Value> {
        self.fields.get(field)?.get(locale)
    }

    /// Sets the value of `field` for `locale`, keeping other locales.
    pub fn set(&mut self, field: impl Into<String>, locale: impl Into<String>, value: Value) {
        let slot = self
            .fields
            .entry(field.into())
            .or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }
        if let Value::Object(locales) = slot {
            locales.insert(locale.into(), value);
        }
    }
}

impl Versioned for Entry {
    fn sys(&self) -> &Sys {
        &self.sys
    }
}

/// An entry field resolved against its content type.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryField {
    value: Value,
    field_type: Option<FieldType>,
}

impl EntryField {
    pub fn new(value: Value, field_type: Option<FieldType>) -> Self {
        Self { value, field_type }
    }

    /// The raw per-locale map (or `null` when the entry has no value).
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Declared type, or `None` if the content type has no such field.
    pub fn field_type(&self) -> Option<&FieldType> {
        self.field_type.as_ref()
    }

    pub fn localized(&self, locale: &str) -> Option<&Value> {
        self.value.get(locale)
    }

    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.value
            .as_object()
            .into_iter()
            .flat_map(|m| m.keys().map(String::as_str))
    }
}
