//! Schema model for the Contentful content management API.
//!
//! This crate holds the plain data types that flow over the wire:
//! - [`Validation`]: the closed set of field constraints, encoded without a type tag
//! - [`Field`] / [`ItemSchema`]: one slot of a content type, with array item schemas
//! - [`ContentType`]: the schema aggregate (ordered fields + display field)
//! - [`Sys`]: identity and version metadata shared by every persisted object
//! - [`Entry`] and [`Webhook`]: the other versioned documents of a space
//!
//! Nothing here performs I/O. The `contentful-cma` crate moves these types
//! across the network and drives their lifecycle.

mod content_type;
mod entry;
mod field;
pub mod mime_type;
mod sys;
mod validation;
mod webhook;

pub use content_type::ContentType;
pub use entry::{Entry, EntryField};
pub use field::{Field, FieldType, ItemSchema, LinkType};
pub use sys::{LifecycleState, Link, LinkSys, Sys, Versioned};
pub use validation::{
    DISCRIMINATOR_ORDER, DateBounds, DateRangeValidation, DimensionValidation, FileSizeValidation,
    ImageDimensions, LinkValidation, MimeTypeGroupValidation, MinMax, PredefinedValue,
    PredefinedValuesValidation, RangeValidation, RegexPattern, RegexValidation, SizeBounds,
    SizeValidation, UniqueValidation, Validation,
};
pub use webhook::{Webhook, WebhookHeader};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while decoding model types.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A validation slot held something other than a JSON object.
    #[error("validation must be a JSON object, got {0}")]
    ValidationNotObject(String),

    /// A recognised discriminating key carried a payload of the wrong shape.
    #[error("invalid `{key}` validation: {reason}")]
    InvalidValidation { key: String, reason: String },
}
