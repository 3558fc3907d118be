//! Paginated listings.
//!
//! A listing endpoint answers with one page at a time:
//! `{"sys":{"type":"Array"},"total":…,"skip":…,"limit":…,"items":[…]}`.
//! Items stay raw JSON until the caller converts them, since entries have no
//! fixed schema.

use crate::client::Client;
use crate::error::{CmaError, CmaResult};
use crate::transport::ApiRequest;
use contentful_model::{ContentType, Entry, Webhook};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio_util::sync::CancellationToken;

/// One page of a listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub sys: PageSys,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub skip: u64,
    #[serde(default)]
    pub limit: u64,
    #[serde(default)]
    pub items: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSys {
    #[serde(rename = "type")]
    pub kind: String,
}

impl Default for PageSys {
    fn default() -> Self {
        Self {
            kind: "Array".to_string(),
        }
    }
}

impl Page {
    /// The terminal page handed out once a cursor is exhausted.
    pub fn empty(skip: u64, limit: u64) -> Self {
        Self {
            skip,
            limit,
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Decodes every item as `T`. The error names the first bad item's index.
    pub fn decode_items<T: DeserializeOwned>(&self) -> CmaResult<Vec<T>> {
        self.items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                T::deserialize(item).map_err(|e| CmaError::Decode(format!("item {i}: {e}")))
            })
            .collect()
    }

    pub fn to_content_types(&self) -> CmaResult<Vec<ContentType>> {
        self.decode_items()
    }

    pub fn to_entries(&self) -> CmaResult<Vec<Entry>> {
        self.decode_items()
    }

    pub fn to_webhooks(&self) -> CmaResult<Vec<Webhook>> {
        self.decode_items()
    }
}

/// A forward-only cursor over a listing endpoint.
///
/// Each [`next`](Self::next) issues one request for the next `skip`/`limit`
/// window. The cursor stops after a short page, an empty page, or once `skip`
/// reaches the reported total; later calls return an empty page without
/// touching the network. To start over, ask the service for a new cursor.
#[derive(Debug)]
pub struct Collection {
    client: Client,
    path: String,
    query: Vec<(String, String)>,
    limit: u64,
    next_skip: u64,
    exhausted: bool,
}

impl Collection {
    pub(crate) fn new(client: Client, path: String) -> Self {
        let limit = client.config().page_limit.max(1);
        Self {
            client,
            path,
            query: Vec::new(),
            limit,
            next_skip: 0,
            exhausted: false,
        }
    }

    /// Adds a filter parameter to every page request.
    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Overrides the page size. Zero is treated as one.
    #[must_use]
    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = limit.max(1);
        self
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    pub fn next_skip(&self) -> u64 {
        self.next_skip
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Fetches the next page. A failed request leaves the cursor where it was.
    pub async fn next(&mut self, cancel: &CancellationToken) -> CmaResult<Page> {
        if self.exhausted {
            return Ok(Page::empty(self.next_skip, self.limit));
        }

        let mut request = ApiRequest::get(self.path.clone())
            .with_query("skip", self.next_skip)
            .with_query("limit", self.limit);
        request.query.extend(self.query.iter().cloned());

        let page: Page = self.client.fetch(request, cancel).await?;

        let received = page.items.len() as u64;
        self.next_skip += received;
        if received == 0
            || received < self.limit
            || (page.total > 0 && self.next_skip >= page.total)
        {
            self.exhausted = true;
        }
        Ok(page)
    }

    /// Drains the cursor, returning every remaining item.
    pub async fn collect_all(mut self, cancel: &CancellationToken) -> CmaResult<Vec<Value>> {
        let mut items = Vec::new();
        while !self.exhausted {
            let page = self.next(cancel).await?;
            items.extend(page.items);
        }
        Ok(items)
    }
}
