use crate::CONTENT_TYPE_HEADER;
use crate::client::{Client, segment};
use crate::collection::Collection;
use crate::error::{CmaError, CmaResult};
use crate::lifecycle::{WritePlan, require_id, versioned};
use crate::transport::ApiRequest;
use contentful_model::{Entry, EntryField, Versioned};
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Entry operations in the configured environment.
///
/// Writes follow the same versioning rules as content types and additionally
/// carry the entry's content type id in a header.
#[derive(Debug, Clone)]
pub struct Entries {
    client: Client,
}

impl Entries {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    fn collection_path(&self, space: &str) -> String {
        format!(
            "/spaces/{}/environments/{}/entries",
            segment(space),
            segment(&self.client.config().environment)
        )
    }

    fn item_path(&self, space: &str, id: &str) -> String {
        format!("{}/{}", self.collection_path(space), segment(id))
    }

    pub async fn get(
        &self,
        space: &str,
        id: &str,
        cancel: &CancellationToken,
    ) -> CmaResult<Entry> {
        let request = ApiRequest::get(self.item_path(space, id));
        self.client.fetch(request, cancel).await
    }

    /// A fresh cursor over every entry in `space`.
    pub fn list(&self, space: &str) -> Collection {
        Collection::new(self.client.clone(), self.collection_path(space))
    }

    /// A fresh cursor over the entries of one content type.
    pub fn list_by_content_type(&self, space: &str, content_type_id: &str) -> Collection {
        self.list(space).with_query("content_type", content_type_id)
    }

    /// Creates or updates `entry`. The body carries only `fields`.
    ///
    /// Fails with [`CmaError::InvalidRequest`] before any request is made if
    /// the entry has no content type reference.
    pub async fn upsert(
        &self,
        space: &str,
        entry: &mut Entry,
        cancel: &CancellationToken,
    ) -> CmaResult<()> {
        let content_type_id = entry
            .content_type_id()
            .ok_or_else(|| {
                CmaError::InvalidRequest("entry has no content type reference".to_string())
            })?
            .to_string();

        let plan = WritePlan::for_sys(&entry.sys)?;
        let request = plan
            .request(
                &self.collection_path(space),
                json!({ "fields": Value::Object(entry.fields.clone()) }),
            )
            .with_header(CONTENT_TYPE_HEADER, &content_type_id);

        let stored: Entry = self.client.fetch(request, cancel).await?;
        *entry = stored;

        info!(
            space,
            content_type = %content_type_id,
            id = entry.id().unwrap_or_default(),
            version = entry.version(),
            "entry {}",
            if plan.is_create() { "created" } else { "updated" }
        );
        Ok(())
    }

    pub async fn publish(
        &self,
        space: &str,
        entry: &mut Entry,
        cancel: &CancellationToken,
    ) -> CmaResult<()> {
        let id = require_id(&entry.sys, "publish")?;
        let request = versioned(
            ApiRequest::put(format!("{}/published", self.item_path(space, id))),
            &entry.sys,
        );

        let stored: Entry = self.client.fetch(request, cancel).await?;
        *entry = stored;

        info!(
            space,
            id = entry.id().unwrap_or_default(),
            version = entry.version(),
            "entry published"
        );
        Ok(())
    }

    pub async fn unpublish(
        &self,
        space: &str,
        entry: &mut Entry,
        cancel: &CancellationToken,
    ) -> CmaResult<()> {
        let id = require_id(&entry.sys, "unpublish")?;
        let request = versioned(
            ApiRequest::delete(format!("{}/published", self.item_path(space, id))),
            &entry.sys,
        );

        let stored: Entry = self.client.fetch(request, cancel).await?;
        *entry = stored;

        info!(
            space,
            id = entry.id().unwrap_or_default(),
            version = entry.version(),
            "entry unpublished"
        );
        Ok(())
    }

    pub async fn delete(
        &self,
        space: &str,
        entry: &Entry,
        cancel: &CancellationToken,
    ) -> CmaResult<()> {
        let id = require_id(&entry.sys, "delete")?;
        let request = versioned(ApiRequest::delete(self.item_path(space, id)), &entry.sys);

        self.client.send(request, cancel).await?;
        info!(space, id, "entry deleted");
        Ok(())
    }

    /// Resolves one field of `entry` together with its declared type.
    ///
    /// Fetches the entry's content type. A field id the content type does not
    /// declare yields no type; a field the entry has no value for yields
    /// `null`.
    pub async fn field(
        &self,
        space: &str,
        entry: &Entry,
        field_id: &str,
        cancel: &CancellationToken,
    ) -> CmaResult<EntryField> {
        let content_type_id = entry.content_type_id().ok_or_else(|| {
            CmaError::InvalidRequest("entry has no content type reference".to_string())
        })?;
        let content_type = self
            .client
            .content_types()
            .get(space, content_type_id, cancel)
            .await?;

        let field_type = content_type.field(field_id).map(|f| f.field_type.clone());
        let value = entry.fields.get(field_id).cloned().unwrap_or(Value::Null);
        Ok(EntryField::new(value, field_type))
    }
}
