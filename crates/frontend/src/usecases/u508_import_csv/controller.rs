//! Upload/Import controller.
//!
//! Drives the two-step handshake with the ingestion service: a preview call
//! that parses the CSV server-side without persisting it, then an import call
//! that persists it. The controller owns all gating state; the view only calls
//! `request_preview` / `request_import` and renders `ControllerState`.
//!
//! State lives in a `RefCell` and no borrow is held across an `.await`, so a
//! single `Rc<UploadImportController<_>>` can be shared by every event handler
//! of the page.

use super::error::ControllerError;
use super::state::{
    ControllerState, ImportSummary, Phase, StatusMessage, UploadSelection, MSG_IMPORT_BUSY,
    MSG_IMPORT_FAILED, MSG_IMPORT_NETWORK, MSG_IMPORT_NO_FILE, MSG_PREVIEW_BUSY,
    MSG_PREVIEW_FAILED, MSG_PREVIEW_NETWORK, MSG_PREVIEW_NO_FILE, MSG_PREVIEW_UNPARSEABLE,
};
use super::transport::{IngestEndpoint, IngestTransport, TransportResponse};
use contracts::system::health::HealthResponse;
use contracts::usecases::u508_import_csv::{ErrorResponse, ImportResponse, PreviewResponse};
use serde::Deserialize;
use serde_json::Value;
use std::cell::RefCell;

type Observer = Box<dyn Fn(&ControllerState)>;

pub struct UploadImportController<T> {
    transport: T,
    state: RefCell<ControllerState>,
    observer: Option<Observer>,
}

impl<T: IngestTransport> UploadImportController<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            state: RefCell::new(ControllerState::default()),
            observer: None,
        }
    }

    /// Called with the new state after every change
    pub fn with_observer(mut self, observer: impl Fn(&ControllerState) + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    pub fn state(&self) -> ControllerState {
        self.state.borrow().clone()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn update(&self, f: impl FnOnce(&mut ControllerState)) {
        f(&mut self.state.borrow_mut());
        if let Some(observer) = &self.observer {
            observer(&self.state.borrow());
        }
    }

    fn show(&self, message: StatusMessage) {
        self.update(|s| s.message = Some(message));
    }

    /// Uploads the file for a server-side preview.
    ///
    /// Returns the number of preview rows. Import becomes available only
    /// when this succeeds.
    pub async fn request_preview(
        &self,
        selection: Option<&UploadSelection>,
    ) -> Result<usize, ControllerError> {
        let Some(selection) = selection else {
            log::warn!("Preview requested without a selected file");
            self.show(StatusMessage::error(MSG_PREVIEW_NO_FILE));
            return Err(ControllerError::no_file_selected());
        };

        if self.state.borrow().preview_in_flight {
            return Err(ControllerError::Busy);
        }

        self.update(|s| {
            s.phase = Phase::Previewing;
            s.can_proceed = false;
            s.preview_in_flight = true;
            s.preview = None;
            s.import = None;
            s.message = Some(StatusMessage::info(MSG_PREVIEW_BUSY));
        });
        let _in_flight = FlightGuard::new(self, |s| s.preview_in_flight = false);
        log::debug!(
            "Previewing {} ({} bytes, has_header={})",
            selection.file.name,
            selection.file.size,
            selection.has_header
        );

        let outcome = self
            .transport
            .post_csv(IngestEndpoint::Preview, selection)
            .await
            .map_err(ControllerError::from)
            .and_then(parse_preview);

        match outcome {
            Ok(preview) => {
                let row_count = preview.row_count();
                log::info!("Preview of {} returned {} row(s)", selection.file.name, row_count);
                self.update(|s| {
                    if s.phase == Phase::Previewing {
                        s.phase = Phase::PreviewReady;
                    }
                    s.can_proceed = true;
                    s.preview = Some(preview);
                    s.message = Some(StatusMessage::info(format!(
                        "Preview: showing {} row(s)",
                        row_count
                    )));
                });
                Ok(row_count)
            }
            Err(err) => {
                log::warn!("Preview of {} failed: {}", selection.file.name, err);
                let text = match &err {
                    ControllerError::RequestFailure { message, .. } => message.clone(),
                    _ => MSG_PREVIEW_NETWORK.to_string(),
                };
                self.update(|s| {
                    if s.phase == Phase::Previewing {
                        s.phase = Phase::Idle;
                    }
                    s.can_proceed = false;
                    s.message = Some(StatusMessage::error(text));
                });
                Err(err)
            }
        }
    }

    /// Sends the same file again for a persisting import.
    ///
    /// Does not look at `can_proceed`; the view keeps the action disabled
    /// until a preview succeeds. The import action is released on every exit
    /// path, including this future being dropped mid-flight.
    pub async fn request_import(
        &self,
        selection: Option<&UploadSelection>,
    ) -> Result<ImportSummary, ControllerError> {
        let Some(selection) = selection else {
            log::warn!("Import requested without a selected file");
            self.show(StatusMessage::error(MSG_IMPORT_NO_FILE));
            return Err(ControllerError::no_file_selected());
        };

        if self.state.borrow().import_in_flight {
            return Err(ControllerError::Busy);
        }

        self.update(|s| {
            s.phase = Phase::Importing;
            s.import_in_flight = true;
            s.import = None;
            s.message = Some(StatusMessage::info(MSG_IMPORT_BUSY));
        });
        let _in_flight = FlightGuard::new(self, |s| s.import_in_flight = false);
        log::debug!("Importing {}", selection.file.name);

        let outcome = self
            .transport
            .post_csv(IngestEndpoint::Import, selection)
            .await
            .map_err(ControllerError::from)
            .and_then(parse_import);

        match outcome {
            Ok(response) => {
                let summary = ImportSummary::from_response(&response);
                log::info!(
                    "Import of {} complete: inserted={} skipped={}",
                    selection.file.name,
                    summary.inserted,
                    summary.skipped
                );
                if let Some(archive_error) = &summary.archive_error {
                    log::warn!("Archive upload failed: {}", archive_error);
                }
                let result = summary.clone();
                self.update(|s| {
                    if s.phase == Phase::Importing {
                        s.phase = Phase::Imported;
                        s.message = Some(StatusMessage::info(summary.completion_message()));
                        s.import = Some(summary);
                    }
                });
                Ok(result)
            }
            Err(err) => {
                log::error!("Import of {} failed: {}", selection.file.name, err);
                let text = match &err {
                    ControllerError::RequestFailure { message, .. } => message.clone(),
                    _ => MSG_IMPORT_NETWORK.to_string(),
                };
                self.update(|s| {
                    if s.phase == Phase::Importing {
                        s.phase = if s.can_proceed {
                            Phase::PreviewReady
                        } else {
                            Phase::Idle
                        };
                        s.message = Some(StatusMessage::error(text));
                    }
                });
                Err(err)
            }
        }
    }

    /// `true` when the service answers `{"status":"ok"}`. Never touches the page state.
    pub async fn check_health(&self) -> bool {
        match self.transport.get_health().await {
            Ok(response) if response.ok() => {
                match serde_json::from_str::<HealthResponse>(&response.body) {
                    Ok(body) => body.is_ok(),
                    Err(e) => {
                        log::warn!("Unexpected health body: {}", e);
                        false
                    }
                }
            }
            Ok(response) => {
                log::warn!("Health check returned status {}", response.status);
                false
            }
            Err(e) => {
                log::error!("Health check failed: {}", e);
                false
            }
        }
    }
}

/// Clears an in-flight flag when dropped
struct FlightGuard<'a, T: IngestTransport> {
    controller: &'a UploadImportController<T>,
    release: fn(&mut ControllerState),
}

impl<'a, T: IngestTransport> FlightGuard<'a, T> {
    fn new(controller: &'a UploadImportController<T>, release: fn(&mut ControllerState)) -> Self {
        Self {
            controller,
            release,
        }
    }
}

impl<T: IngestTransport> Drop for FlightGuard<'_, T> {
    fn drop(&mut self) {
        self.controller.update(self.release);
    }
}

/// Error bodies of the preview endpoint may be anything; success bodies must parse.
fn parse_preview(response: TransportResponse) -> Result<PreviewResponse, ControllerError> {
    if !response.ok() {
        let message = match serde_json::from_str::<Value>(&response.body) {
            Ok(body) => ErrorResponse::message_or(&body, MSG_PREVIEW_FAILED),
            Err(_) => MSG_PREVIEW_UNPARSEABLE.to_string(),
        };
        return Err(ControllerError::RequestFailure {
            status: response.status,
            message,
        });
    }

    serde_json::from_str(&response.body)
        .map_err(|e| ControllerError::Network(format!("Failed to parse preview: {}", e)))
}

/// The import endpoint always answers with JSON, whatever the status.
fn parse_import(response: TransportResponse) -> Result<ImportResponse, ControllerError> {
    let body: Value = serde_json::from_str(&response.body)
        .map_err(|e| ControllerError::Network(format!("Failed to parse import response: {}", e)))?;

    if !response.ok() {
        return Err(ControllerError::RequestFailure {
            status: response.status,
            message: ErrorResponse::message_or(&body, MSG_IMPORT_FAILED),
        });
    }

    ImportResponse::deserialize(&body)
        .map_err(|e| ControllerError::Network(format!("Failed to parse import response: {}", e)))
}
