pub mod api;
pub mod controller;
pub mod error;
pub mod file_reader;
pub mod state;
pub mod transport;
pub mod view;

pub use controller::UploadImportController;
pub use error::{ControllerError, TransportError};
pub use state::{ControllerState, ImportSummary, Phase, UploadFile, UploadSelection};
pub use transport::{IngestEndpoint, IngestTransport, TransportResponse};
pub use view::ImportCsvView;
