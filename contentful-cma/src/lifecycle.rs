//! Create-or-update decisions and version preconditions.
//!
//! The only thing that decides between create and update is the creation
//! timestamp in `sys`. A caller may pick an id for a new document up front;
//! without a timestamp that is still a create, just aimed at the id's path.

use crate::VERSION_HEADER;
use crate::client::segment;
use crate::error::{CmaError, CmaResult};
use crate::transport::ApiRequest;
use contentful_model::Sys;
use serde::Serialize;
use serde_json::Value;

/// The write an upsert will issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WritePlan {
    /// `POST` to the collection, or `PUT` to `{collection}/{id}` when the
    /// caller chose the id. No version precondition.
    Create { id: Option<String> },
    /// Full-replace `PUT` guarded by the current version.
    Update { id: String, version: u64 },
}

impl WritePlan {
    pub fn for_sys(sys: &Sys) -> CmaResult<Self> {
        if !sys.is_persisted() {
            return Ok(WritePlan::Create { id: sys.id.clone() });
        }
        let id = sys.id.clone().ok_or_else(|| {
            CmaError::InvalidRequest("document has a creation timestamp but no id".to_string())
        })?;
        Ok(WritePlan::Update {
            id,
            version: sys.version(),
        })
    }

    pub fn is_create(&self) -> bool {
        matches!(self, WritePlan::Create { .. })
    }

    /// Builds the request for `collection_path`.
    pub fn request(&self, collection_path: &str, body: Value) -> ApiRequest {
        let request = match self {
            WritePlan::Create { id: None } => ApiRequest::post(collection_path),
            WritePlan::Create { id: Some(id) } => {
                ApiRequest::put(format!("{collection_path}/{}", segment(id)))
            }
            WritePlan::Update { id, version } => {
                ApiRequest::put(format!("{collection_path}/{}", segment(id)))
                    .with_header(VERSION_HEADER, version)
            }
        };
        request.with_body(body)
    }
}

/// The document's id, or an error naming the operation that needed it.
pub(crate) fn require_id<'a>(sys: &'a Sys, operation: &str) -> CmaResult<&'a str> {
    sys.id
        .as_deref()
        .ok_or_else(|| CmaError::InvalidRequest(format!("{operation} requires a document id")))
}

/// Attaches the version precondition held in `sys`.
pub(crate) fn versioned(request: ApiRequest, sys: &Sys) -> ApiRequest {
    request.with_header(VERSION_HEADER, sys.version())
}

/// Serializes a document as a request body, leaving out `sys`.
pub(crate) fn body_without_sys<T: Serialize>(document: &T) -> CmaResult<Value> {
    let mut body = serde_json::to_value(document)?;
    if let Some(map) = body.as_object_mut() {
        map.remove("sys");
    }
    Ok(body)
}
