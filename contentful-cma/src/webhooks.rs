use crate::client::{Client, segment};
use crate::collection::Collection;
use crate::error::CmaResult;
use crate::lifecycle::{WritePlan, body_without_sys, require_id, versioned};
use crate::transport::ApiRequest;
use contentful_model::{Versioned, Webhook};
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Webhook definition operations.
#[derive(Debug, Clone)]
pub struct Webhooks {
    client: Client,
}

impl Webhooks {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    fn collection_path(space: &str) -> String {
        format!("/spaces/{}/webhook_definitions", segment(space))
    }

    fn item_path(space: &str, id: &str) -> String {
        format!("{}/{}", Self::collection_path(space), segment(id))
    }

    pub async fn get(
        &self,
        space: &str,
        id: &str,
        cancel: &CancellationToken,
    ) -> CmaResult<Webhook> {
        let request = ApiRequest::get(Self::item_path(space, id));
        self.client.fetch(request, cancel).await
    }

    pub fn list(&self, space: &str) -> Collection {
        Collection::new(self.client.clone(), Self::collection_path(space))
    }

    /// Creates or updates `webhook`, adopting the stored representation.
    pub async fn upsert(
        &self,
        space: &str,
        webhook: &mut Webhook,
        cancel: &CancellationToken,
    ) -> CmaResult<()> {
        let plan = WritePlan::for_sys(&webhook.sys)?;
        let body = body_without_sys(webhook)?;
        let request = plan.request(&Self::collection_path(space), body);

        let stored: Webhook = self.client.fetch(request, cancel).await?;
        *webhook = stored;

        info!(
            space,
            id = webhook.id().unwrap_or_default(),
            version = webhook.version(),
            "webhook {}",
            if plan.is_create() { "created" } else { "updated" }
        );
        Ok(())
    }

    pub async fn delete(
        &self,
        space: &str,
        webhook: &Webhook,
        cancel: &CancellationToken,
    ) -> CmaResult<()> {
        let id = require_id(&webhook.sys, "delete")?;
        let request = versioned(
            ApiRequest::delete(Self::item_path(space, id)),
            &webhook.sys,
        );

        self.client.send(request, cancel).await?;
        info!(space, id, "webhook deleted");
        Ok(())
    }
}
