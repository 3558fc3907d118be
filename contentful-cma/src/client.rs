use crate::config::ClientConfig;
use crate::content_types::ContentTypes;
use crate::entries::Entries;
use crate::error::{ApiError, CmaError, CmaResult};
use crate::transport::{ApiRequest, ApiResponse, HttpTransport, Transport};
use crate::webhooks::Webhooks;
use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Handle to the management API.
///
/// Cheap to clone; clones share the transport. The client keeps no state
/// between calls: every operation issues exactly one request (bulk helpers
/// excepted) and nothing is retried.
#[derive(Clone)]
pub struct Client {
    transport: Arc<dyn Transport>,
    config: Arc<ClientConfig>,
}

impl Client {
    /// Creates a client using the default HTTP transport.
    pub fn new(config: ClientConfig) -> CmaResult<Self> {
        let transport = HttpTransport::new(&config)?;
        Self::with_transport(config, transport)
    }

    /// Creates a client that sends requests through `transport`.
    pub fn with_transport(
        config: ClientConfig,
        transport: impl Transport + 'static,
    ) -> CmaResult<Self> {
        config.validate()?;
        Ok(Self {
            transport: Arc::new(transport),
            config: Arc::new(config),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn content_types(&self) -> ContentTypes {
        ContentTypes::new(self.clone())
    }

    pub fn entries(&self) -> Entries {
        Entries::new(self.clone())
    }

    pub fn webhooks(&self) -> Webhooks {
        Webhooks::new(self.clone())
    }

    /// Sends a request, racing it against `cancel`.
    ///
    /// Non-2xx responses come back as the typed error for their status.
    pub(crate) async fn send(
        &self,
        request: ApiRequest,
        cancel: &CancellationToken,
    ) -> CmaResult<ApiResponse> {
        if cancel.is_cancelled() {
            return Err(CmaError::Cancelled);
        }

        debug!(method = %request.method, path = %request.path, "sending request");
        let path = request.path.clone();

        let response = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(CmaError::Cancelled),
            result = self.transport.send(request) => result?,
        };

        if response.is_success() {
            return Ok(response);
        }

        let error = CmaError::from_api(ApiError::from_response(response.status, &response.body));
        if error.is_conflict() {
            warn!(path = %path, error = %error, "version conflict");
        }
        Err(error)
    }

    /// Sends a request and decodes the response body.
    pub(crate) async fn fetch<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
        cancel: &CancellationToken,
    ) -> CmaResult<T> {
        self.send(request, cancel).await?.json()
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Percent-encodes one path segment.
pub(crate) fn segment(raw: &str) -> std::borrow::Cow<'_, str> {
    urlencoding::encode(raw)
}
