use crate::{Field, Sys, Versioned};
use serde::{Deserialize, Serialize};

/// A schema document: an ordered list of fields plus a display field.
///
/// `display_field` should name one of `fields`. That is checked by the server,
/// not here, but the value is always carried through unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentType {
    #[serde(default, skip_serializing_if = "Sys::is_empty")]
    pub sys: Sys,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_field: Option<String>,
    #[serde(default)]
    pub fields: Vec<Field>,
}

impl ContentType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Looks up a field by id.
    pub fn field(&self, id: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.id == id)
    }

    pub fn field_mut(&mut self, id: &str) -> Option<&mut Field> {
        self.fields.iter_mut().find(|f| f.id == id)
    }

    /// The field named by `display_field`, if it is present in `fields`.
    pub fn display_field(&self) -> Option<&Field> {
        self.display_field.as_deref().and_then(|id| self.field(id))
    }
}

impl Versioned for ContentType {
    fn sys(&self) -> &Sys {
        &self.sys
    }
}
