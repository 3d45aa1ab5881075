use super::error::TransportError;
use super::state::{UploadFile, UploadSelection};
use super::transport::{IngestEndpoint, IngestTransport, TransportResponse};
use crate::shared::config::IngestConfig;
use async_trait::async_trait;
use contracts::usecases::u508_import_csv::{CsvUploadForm, FIELD_FILE};
use gloo_net::http::Request as GlooRequest;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, FormData, Request, RequestInit, RequestMode, Response};

/// `IngestTransport` over the browser fetch API
#[derive(Debug, Clone)]
pub struct BrowserTransport {
    config: IngestConfig,
}

impl BrowserTransport {
    pub fn new(config: IngestConfig) -> Self {
        Self { config }
    }

    fn endpoint_url(&self, endpoint: IngestEndpoint) -> String {
        match endpoint {
            IngestEndpoint::Preview => self.config.url(&self.config.preview_path),
            IngestEndpoint::Import => self.config.url(&self.config.import_path),
        }
    }
}

#[async_trait(?Send)]
impl IngestTransport for BrowserTransport {
    async fn post_csv(
        &self,
        endpoint: IngestEndpoint,
        selection: &UploadSelection,
    ) -> Result<TransportResponse, TransportError> {
        let url = self.endpoint_url(endpoint);
        let form_data = build_form(selection)?;

        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_mode(RequestMode::Cors);
        // No Content-Type header: the browser adds the multipart boundary itself
        opts.set_body(&form_data);

        let request = Request::new_with_str_and_init(&url, &opts)
            .map_err(|e| TransportError::Request(format!("{e:?}")))?;

        let window =
            web_sys::window().ok_or_else(|| TransportError::Fetch("no window".to_string()))?;
        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| TransportError::Fetch(format!("{e:?}")))?;
        let resp: Response = resp_value
            .dyn_into()
            .map_err(|e| TransportError::Fetch(format!("{e:?}")))?;

        let text = JsFuture::from(resp.text().map_err(|e| TransportError::Body(format!("{e:?}")))?)
            .await
            .map_err(|e| TransportError::Body(format!("{e:?}")))?;
        let body = text
            .as_string()
            .ok_or_else(|| TransportError::Body("bad text".to_string()))?;

        log::debug!("POST {} -> {}", url, resp.status());
        Ok(TransportResponse::new(resp.status(), body))
    }

    async fn get_health(&self) -> Result<TransportResponse, TransportError> {
        let url = self.config.url(&self.config.health_path);

        let response = GlooRequest::get(&url)
            .send()
            .await
            .map_err(|e| TransportError::Fetch(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Body(e.to_string()))?;

        Ok(TransportResponse::new(status, body))
    }
}

/// `file` part first, then the text parts
fn build_form(selection: &UploadSelection) -> Result<FormData, TransportError> {
    let form_data = FormData::new().map_err(|e| TransportError::Request(format!("{e:?}")))?;

    let blob = file_blob(&selection.file)?;
    form_data
        .append_with_blob_and_filename(FIELD_FILE, &blob, &selection.file.name)
        .map_err(|e| TransportError::Request(format!("{e:?}")))?;

    for (name, value) in CsvUploadForm::new(selection.has_header).text_fields() {
        form_data
            .append_with_str(name, value)
            .map_err(|e| TransportError::Request(format!("{e:?}")))?;
    }

    Ok(form_data)
}

fn file_blob(file: &UploadFile) -> Result<Blob, TransportError> {
    let parts = js_sys::Array::new();
    parts.push(&js_sys::Uint8Array::from(file.bytes.as_slice()));

    let properties = BlobPropertyBag::new();
    properties.set_type(&file.content_type);

    Blob::new_with_u8_array_sequence_and_options(&parts, &properties)
        .map_err(|e| TransportError::Request(format!("Failed to create blob: {e:?}")))
}
