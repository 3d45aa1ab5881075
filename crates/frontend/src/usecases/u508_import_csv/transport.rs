use super::error::TransportError;
use super::state::UploadSelection;
use async_trait::async_trait;

/// The two multipart endpoints of the ingestion service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestEndpoint {
    Preview,
    Import,
}

/// Status and raw body of a completed exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Same rule as `Response.ok` in the browser
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP seam of the controller.
///
/// Browser futures are not `Send`, so neither is this trait.
#[async_trait(?Send)]
pub trait IngestTransport {
    /// Send `selection` as a multipart form to `endpoint`.
    /// A non-success status is still `Ok`; only transport failures are `Err`.
    async fn post_csv(
        &self,
        endpoint: IngestEndpoint,
        selection: &UploadSelection,
    ) -> Result<TransportResponse, TransportError>;

    /// `GET /healthz`
    async fn get_health(&self) -> Result<TransportResponse, TransportError>;
}
