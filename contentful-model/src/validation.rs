//! Field validations.
//!
//! On the wire a validation is a bare JSON object with no type tag. The kind of
//! constraint is implied by which discriminating key is present (`"size"`,
//! `"in"`, `"assetFileSize"`, ...). Inside the crate a validation is an ordinary
//! enum; the key sniffing happens only in [`Validation::decode`], which every
//! deserialization path goes through.
//!
//! Objects carrying none of the known keys decode to [`Validation::Unknown`]
//! and re-encode byte-for-byte, so constraint kinds added by the server later
//! survive a read-modify-write cycle through this client.

use crate::{Error, Result};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Discriminating keys in the order they are tested during decoding.
///
/// The server never emits two of these in one object; the order only matters
/// for hand-written payloads and is fixed here rather than left to map order.
pub const DISCRIMINATOR_ORDER: [&str; 10] = [
    "unique",
    "size",
    "regex",
    "in",
    "range",
    "dateRange",
    "linkContentType",
    "linkMimetypeGroup",
    "assetImageDimensions",
    "assetFileSize",
];

/// Spelling of the regex key used by older API payloads. Accepted on decode,
/// never emitted.
const REGEX_LEGACY_KEY: &str = "regexp";

/// Numeric bounds where either side may be open.
///
/// An absent bound is omitted from the JSON object, never written as `null`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MinMax {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl MinMax {
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    pub fn at_least(min: f64) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    pub fn at_most(max: f64) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }
}

/// `{"unique": bool, "message"?}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniqueValidation {
    pub unique: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Length bounds used by `size`. Integers only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeBounds {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<i64>,
}

/// `{"size": {"min"?, "max"?}, "message"?}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeValidation {
    pub size: SizeBounds,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegexPattern {
    pub pattern: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<String>,
}

/// `{"regex": {"pattern", "flags"?}, "message"?}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegexValidation {
    #[serde(alias = "regexp")]
    pub regex: RegexPattern,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// One allowed value of an `in` validation.
///
/// Integers stay integers and decimals stay decimals; a list is never coerced
/// to a single type. Integers above `i64::MAX` land in `Unsigned`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PredefinedValue {
    Integer(i64),
    Unsigned(u64),
    Number(f64),
    Text(String),
    Boolean(bool),
}

impl From<i64> for PredefinedValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for PredefinedValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<u64> for PredefinedValue {
    fn from(value: u64) -> Self {
        i64::try_from(value).map_or(Self::Unsigned(value), Self::Integer)
    }
}

impl From<f64> for PredefinedValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for PredefinedValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for PredefinedValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for PredefinedValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

/// `{"in": [scalar, ...], "message"?}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredefinedValuesValidation {
    #[serde(rename = "in")]
    pub allowed: Vec<PredefinedValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// `{"range": {"min"?, "max"?}, "message"?}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeValidation {
    pub range: MinMax,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Date bounds are kept as the ISO 8601 strings the API sends.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateBounds {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<String>,
}

/// `{"dateRange": {"min"?, "max"?}, "message"?}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateRangeValidation {
    #[serde(rename = "dateRange")]
    pub date_range: DateBounds,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// `{"linkContentType": [content type id, ...], "message"?}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkValidation {
    #[serde(rename = "linkContentType")]
    pub content_type_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// `{"linkMimetypeGroup": [group, ...], "message"?}`. See [`crate::mime_type`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MimeTypeGroupValidation {
    #[serde(rename = "linkMimetypeGroup")]
    pub groups: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageDimensions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<MinMax>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<MinMax>,
}

/// `{"assetImageDimensions": {"width"?, "height"?}, "message"?}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionValidation {
    #[serde(rename = "assetImageDimensions")]
    pub dimensions: ImageDimensions,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// `{"assetFileSize": {"min"?, "max"?}, "message"?}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileSizeValidation {
    #[serde(rename = "assetFileSize")]
    pub bounds: MinMax,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// A single constraint attached to a field or to an array field's items.
#[derive(Debug, Clone, PartialEq)]
pub enum Validation {
    Unique(UniqueValidation),
    Size(SizeValidation),
    Regex(RegexValidation),
    PredefinedValues(PredefinedValuesValidation),
    Range(RangeValidation),
    DateRange(DateRangeValidation),
    Link(LinkValidation),
    MimeTypeGroup(MimeTypeGroupValidation),
    Dimension(DimensionValidation),
    FileSize(FileSizeValidation),
    /// An object carrying none of the known discriminating keys, kept verbatim.
    Unknown(Map<String, Value>),
}

impl Validation {
    pub fn unique(unique: bool) -> Self {
        Self::Unique(UniqueValidation {
            unique,
            message: None,
        })
    }

    pub fn size(min: Option<i64>, max: Option<i64>) -> Self {
        Self::Size(SizeValidation {
            size: SizeBounds { min, max },
            message: None,
        })
    }

    pub fn regex(pattern: impl Into<String>, flags: Option<String>) -> Self {
        Self::Regex(RegexValidation {
            regex: RegexPattern {
                pattern: pattern.into(),
                flags,
            },
            message: None,
        })
    }

    pub fn predefined_values<V>(allowed: impl IntoIterator<Item = V>) -> Self
    where
        V: Into<PredefinedValue>,
    {
        Self::PredefinedValues(PredefinedValuesValidation {
            allowed: allowed.into_iter().map(Into::into).collect(),
            message: None,
        })
    }

    pub fn range(range: MinMax) -> Self {
        Self::Range(RangeValidation {
            range,
            message: None,
        })
    }

    pub fn date_range(min: Option<String>, max: Option<String>) -> Self {
        Self::DateRange(DateRangeValidation {
            date_range: DateBounds { min, max },
            message: None,
        })
    }

    pub fn link_content_types<S: Into<String>>(ids: impl IntoIterator<Item = S>) -> Self {
        Self::Link(LinkValidation {
            content_type_ids: ids.into_iter().map(Into::into).collect(),
            message: None,
        })
    }

    pub fn mime_type_groups<S: Into<String>>(groups: impl IntoIterator<Item = S>) -> Self {
        Self::MimeTypeGroup(MimeTypeGroupValidation {
            groups: groups.into_iter().map(Into::into).collect(),
            message: None,
        })
    }

    pub fn dimensions(width: Option<MinMax>, height: Option<MinMax>) -> Self {
        Self::Dimension(DimensionValidation {
            dimensions: ImageDimensions { width, height },
            message: None,
        })
    }

    pub fn file_size(bounds: MinMax) -> Self {
        Self::FileSize(FileSizeValidation {
            bounds,
            message: None,
        })
    }

    /// Sets the error-message override.
    ///
    /// On an unknown validation the `message` key of the raw object is set.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        let message = message.into();
        match &mut self {
            Self::Unique(v) => v.message = Some(message),
            Self::Size(v) => v.message = Some(message),
            Self::Regex(v) => v.message = Some(message),
            Self::PredefinedValues(v) => v.message = Some(message),
            Self::Range(v) => v.message = Some(message),
            Self::DateRange(v) => v.message = Some(message),
            Self::Link(v) => v.message = Some(message),
            Self::MimeTypeGroup(v) => v.message = Some(message),
            Self::Dimension(v) => v.message = Some(message),
            Self::FileSize(v) => v.message = Some(message),
            Self::Unknown(map) => {
                map.insert("message".to_string(), Value::String(message));
            }
        }
        self
    }

    /// The error-message override, if one is set.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Unique(v) => v.message.as_deref(),
            Self::Size(v) => v.message.as_deref(),
            Self::Regex(v) => v.message.as_deref(),
            Self::PredefinedValues(v) => v.message.as_deref(),
            Self::Range(v) => v.message.as_deref(),
            Self::DateRange(v) => v.message.as_deref(),
            Self::Link(v) => v.message.as_deref(),
            Self::MimeTypeGroup(v) => v.message.as_deref(),
            Self::Dimension(v) => v.message.as_deref(),
            Self::FileSize(v) => v.message.as_deref(),
            Self::Unknown(map) => map.get("message").and_then(Value::as_str),
        }
    }

    /// The discriminating key this validation is written under, or `None` for
    /// [`Validation::Unknown`].
    pub fn key(&self) -> Option<&'static str> {
        let key = match self {
            Self::Unique(_) => "unique",
            Self::Size(_) => "size",
            Self::Regex(_) => "regex",
            Self::PredefinedValues(_) => "in",
            Self::Range(_) => "range",
            Self::DateRange(_) => "dateRange",
            Self::Link(_) => "linkContentType",
            Self::MimeTypeGroup(_) => "linkMimetypeGroup",
            Self::Dimension(_) => "assetImageDimensions",
            Self::FileSize(_) => "assetFileSize",
            Self::Unknown(_) => return None,
        };
        Some(key)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown(_))
    }

    /// Decodes one validation object by sniffing its discriminating key.
    pub fn decode(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Self::decode_object(map),
            other => Err(Error::ValidationNotObject(json_kind(&other).to_string())),
        }
    }

    fn decode_object(map: Map<String, Value>) -> Result<Self> {
        let Some(kind) = discriminator(&map) else {
            return Ok(Self::Unknown(map));
        };

        let value = Value::Object(map);
        let invalid = |e: serde_json::Error| Error::InvalidValidation {
            key: kind.key().to_string(),
            reason: e.to_string(),
        };

        let validation = match kind {
            Kind::Unique => Self::Unique(serde_json::from_value(value).map_err(invalid)?),
            Kind::Size => Self::Size(serde_json::from_value(value).map_err(invalid)?),
            Kind::Regex => Self::Regex(serde_json::from_value(value).map_err(invalid)?),
            Kind::In => Self::PredefinedValues(serde_json::from_value(value).map_err(invalid)?),
            Kind::Range => Self::Range(serde_json::from_value(value).map_err(invalid)?),
            Kind::DateRange => Self::DateRange(serde_json::from_value(value).map_err(invalid)?),
            Kind::LinkContentType => Self::Link(serde_json::from_value(value).map_err(invalid)?),
            Kind::LinkMimetypeGroup => {
                Self::MimeTypeGroup(serde_json::from_value(value).map_err(invalid)?)
            }
            Kind::AssetImageDimensions => {
                Self::Dimension(serde_json::from_value(value).map_err(invalid)?)
            }
            Kind::AssetFileSize => Self::FileSize(serde_json::from_value(value).map_err(invalid)?),
        };
        Ok(validation)
    }

    /// Encodes this validation to its canonical JSON object.
    pub fn encode(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Decode targets, listed in [`DISCRIMINATOR_ORDER`] order.
#[derive(Debug, Clone, Copy)]
enum Kind {
    Unique,
    Size,
    Regex,
    In,
    Range,
    DateRange,
    LinkContentType,
    LinkMimetypeGroup,
    AssetImageDimensions,
    AssetFileSize,
}

impl Kind {
    const ALL: [Kind; 10] = [
        Kind::Unique,
        Kind::Size,
        Kind::Regex,
        Kind::In,
        Kind::Range,
        Kind::DateRange,
        Kind::LinkContentType,
        Kind::LinkMimetypeGroup,
        Kind::AssetImageDimensions,
        Kind::AssetFileSize,
    ];

    fn key(self) -> &'static str {
        DISCRIMINATOR_ORDER[self as usize]
    }

    fn matches(self, map: &Map<String, Value>) -> bool {
        map.contains_key(self.key())
            || (matches!(self, Kind::Regex) && map.contains_key(REGEX_LEGACY_KEY))
    }
}

/// First kind whose discriminating key is present in `map`.
fn discriminator(map: &Map<String, Value>) -> Option<Kind> {
    Kind::ALL.into_iter().find(|kind| kind.matches(map))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl Serialize for Validation {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Unique(v) => v.serialize(serializer),
            Self::Size(v) => v.serialize(serializer),
            Self::Regex(v) => v.serialize(serializer),
            Self::PredefinedValues(v) => v.serialize(serializer),
            Self::Range(v) => v.serialize(serializer),
            Self::DateRange(v) => v.serialize(serializer),
            Self::Link(v) => v.serialize(serializer),
            Self::MimeTypeGroup(v) => v.serialize(serializer),
            Self::Dimension(v) => v.serialize(serializer),
            Self::FileSize(v) => v.serialize(serializer),
            Self::Unknown(map) => map.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Validation {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Self::decode(value).map_err(D::Error::custom)
    }
}
