use crate::Validation;
use serde::{Deserialize, Serialize};

/// One typed slot of a content type.
///
/// Flags are only written when set and empty validation lists are omitted,
/// so an untouched field serializes to just `id`, `name` and `type`. No
/// cross-field checks happen here (e.g. `link_type` on a non-link field);
/// the server enforces those.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_type: Option<LinkType>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub required: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub disabled: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub omitted: bool,
    /// Order is part of the wire contract and is preserved as given.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validations: Vec<Validation>,
    /// Item schema for `Array` fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<ItemSchema>,
}

impl Field {
    pub fn new(id: impl Into<String>, name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            field_type,
            link_type: None,
            required: false,
            disabled: false,
            omitted: false,
            validations: Vec::new(),
            items: None,
        }
    }

    /// Shorthand for a `Link` field pointing at entries or assets.
    pub fn link(id: impl Into<String>, name: impl Into<String>, link_type: LinkType) -> Self {
        Self {
            link_type: Some(link_type),
            ..Self::new(id, name, FieldType::Link)
        }
    }

    /// Shorthand for an `Array` field with the given item schema.
    pub fn array(id: impl Into<String>, name: impl Into<String>, items: ItemSchema) -> Self {
        Self {
            items: Some(items),
            ..Self::new(id, name, FieldType::Array)
        }
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    #[must_use]
    pub fn omitted(mut self) -> Self {
        self.omitted = true;
        self
    }

    /// Replaces the item schema.
    #[must_use]
    pub fn with_items(mut self, items: ItemSchema) -> Self {
        self.items = Some(items);
        self
    }

    /// Appends a validation after any already present.
    #[must_use]
    pub fn with_validation(mut self, validation: Validation) -> Self {
        self.validations.push(validation);
        self
    }
}

/// Schema of the elements of an `Array` field. Nested arrays are not modelled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemSchema {
    #[serde(rename = "type")]
    pub item_type: FieldType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_type: Option<LinkType>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validations: Vec<Validation>,
}

impl ItemSchema {
    pub fn new(item_type: FieldType) -> Self {
        Self {
            item_type,
            link_type: None,
            validations: Vec::new(),
        }
    }

    pub fn link(link_type: LinkType) -> Self {
        Self {
            link_type: Some(link_type),
            ..Self::new(FieldType::Link)
        }
    }

    #[must_use]
    pub fn with_validation(mut self, validation: Validation) -> Self {
        self.validations.push(validation);
        self
    }
}

/// Primitive type tag of a field.
///
/// Type names this client does not know are kept in [`FieldType::Other`] and
/// written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldType {
    Symbol,
    Text,
    RichText,
    Integer,
    Number,
    Date,
    Boolean,
    Location,
    Link,
    Array,
    Object,
    #[serde(untagged)]
    Other(String),
}

/// Target of a `Link` field or item schema. Unknown targets are kept in
/// [`LinkType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinkType {
    Entry,
    Asset,
    #[serde(untagged)]
    Other(String),
}

fn is_false(value: &bool) -> bool {
    !*value
}
