//! Client for the Contentful content management API.
//!
//! Three pieces sit on top of the schema types from `contentful-model`:
//! - [`Collection`]: a forward-only cursor over paginated listings
//! - [`WritePlan`]: the create-or-update decision and version precondition
//!   behind every upsert
//! - the services ([`ContentTypes`], [`Entries`], [`Webhooks`]) that apply
//!   both to concrete documents
//!
//! Every network call is `async` and takes a [`CancellationToken`]. A
//! cancelled or failed call never modifies the document passed in; a
//! successful write replaces it with the server's copy.

mod client;
mod collection;
mod config;
mod content_types;
mod entries;
mod error;
mod lifecycle;
pub mod transport;
mod webhooks;

pub use client::Client;
pub use collection::{Collection, Page, PageSys};
pub use config::ClientConfig;
pub use content_types::ContentTypes;
pub use entries::Entries;
pub use error::{ApiError, CmaError, CmaResult};
pub use lifecycle::WritePlan;
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Transport};
pub use webhooks::Webhooks;

pub use contentful_model as model;
pub use tokio_util::sync::CancellationToken;

/// Version precondition header sent on every update, publish state change
/// and delete.
pub const VERSION_HEADER: &str = "X-Contentful-Version";

/// Content type reference header sent on entry writes.
pub const CONTENT_TYPE_HEADER: &str = "X-Contentful-Content-Type";
