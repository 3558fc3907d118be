use crate::client::{Client, segment};
use crate::collection::Collection;
use crate::error::CmaResult;
use crate::lifecycle::{WritePlan, body_without_sys, require_id, versioned};
use crate::transport::ApiRequest;
use contentful_model::{ContentType, Versioned};
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Content type operations, scoped per call to a space.
#[derive(Debug, Clone)]
pub struct ContentTypes {
    client: Client,
}

impl ContentTypes {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    fn collection_path(space: &str) -> String {
        format!("/spaces/{}/content_types", segment(space))
    }

    fn item_path(space: &str, id: &str) -> String {
        format!("{}/{}", Self::collection_path(space), segment(id))
    }

    pub async fn get(
        &self,
        space: &str,
        id: &str,
        cancel: &CancellationToken,
    ) -> CmaResult<ContentType> {
        let request = ApiRequest::get(Self::item_path(space, id));
        self.client.fetch(request, cancel).await
    }

    /// A fresh cursor over every content type in `space`.
    pub fn list(&self, space: &str) -> Collection {
        Collection::new(self.client.clone(), Self::collection_path(space))
    }

    /// Creates or updates `content_type`.
    ///
    /// On success the stored representation replaces `content_type`, so its
    /// `sys` (id, version, timestamps) reflects the server. On any failure it
    /// is left untouched.
    pub async fn upsert(
        &self,
        space: &str,
        content_type: &mut ContentType,
        cancel: &CancellationToken,
    ) -> CmaResult<()> {
        let plan = WritePlan::for_sys(&content_type.sys)?;
        let body = body_without_sys(content_type)?;
        let request = plan.request(&Self::collection_path(space), body);

        let stored: ContentType = self.client.fetch(request, cancel).await?;
        *content_type = stored;

        info!(
            space,
            id = content_type.id().unwrap_or_default(),
            version = content_type.version(),
            "content type {}",
            if plan.is_create() { "created" } else { "updated" }
        );
        Ok(())
    }

    /// Publishes the version held in memory.
    pub async fn activate(
        &self,
        space: &str,
        content_type: &mut ContentType,
        cancel: &CancellationToken,
    ) -> CmaResult<()> {
        let id = require_id(&content_type.sys, "activate")?;
        let request = versioned(
            ApiRequest::put(format!("{}/published", Self::item_path(space, id))),
            &content_type.sys,
        );

        let stored: ContentType = self.client.fetch(request, cancel).await?;
        *content_type = stored;

        info!(
            space,
            id = content_type.id().unwrap_or_default(),
            version = content_type.version(),
            "content type activated"
        );
        Ok(())
    }

    /// Unpublishes; the content type goes back to draft.
    pub async fn deactivate(
        &self,
        space: &str,
        content_type: &mut ContentType,
        cancel: &CancellationToken,
    ) -> CmaResult<()> {
        let id = require_id(&content_type.sys, "deactivate")?;
        let request = versioned(
            ApiRequest::delete(format!("{}/published", Self::item_path(space, id))),
            &content_type.sys,
        );

        let stored: ContentType = self.client.fetch(request, cancel).await?;
        *content_type = stored;

        info!(
            space,
            id = content_type.id().unwrap_or_default(),
            version = content_type.version(),
            "content type deactivated"
        );
        Ok(())
    }

    /// Deletes a content type. The server refuses while it is published.
    pub async fn delete(
        &self,
        space: &str,
        content_type: &ContentType,
        cancel: &CancellationToken,
    ) -> CmaResult<()> {
        let id = require_id(&content_type.sys, "delete")?;
        let request = versioned(
            ApiRequest::delete(Self::item_path(space, id)),
            &content_type.sys,
        );

        self.client.send(request, cancel).await?;
        info!(space, id, "content type deleted");
        Ok(())
    }

    /// Deletes every content type in `space` that has never been published.
    ///
    /// All pages are read before the first delete so removals cannot shift
    /// the listing under the cursor. Stops at the first failure; returns how
    /// many were deleted.
    pub async fn delete_drafts(
        &self,
        space: &str,
        cancel: &CancellationToken,
    ) -> CmaResult<usize> {
        let mut cursor = self.list(space);
        let mut drafts = Vec::new();
        while !cursor.is_exhausted() {
            let page = cursor.next(cancel).await?;
            drafts.extend(
                page.to_content_types()?
                    .into_iter()
                    .filter(|ct| !ct.sys.is_published()),
            );
        }

        for content_type in &drafts {
            self.delete(space, content_type, cancel).await?;
        }
        Ok(drafts.len())
    }
}
