pub mod request;
pub mod response;

pub use request::{encode_has_header, CsvUploadForm, FIELD_FILE, FIELD_HAS_HEADER};
pub use response::{ArchiveInfo, ErrorResponse, ImportResponse, PreviewResponse, RowError};

use crate::usecases::common::UseCaseMetadata;

/// Parse a CSV on the server without persisting it
pub const PREVIEW_PATH: &str = "/api/preview_csv";

/// Persist a CSV on the server and archive the original file
pub const IMPORT_PATH: &str = "/api/import_csv";

/// Lifetime of the presigned archive link returned by the import call
pub const ARCHIVE_LINK_TTL_SECS: u64 = 3600;

pub struct ImportCsv;

impl UseCaseMetadata for ImportCsv {
    fn usecase_index() -> &'static str {
        "u508"
    }

    fn usecase_name() -> &'static str {
        "import_csv"
    }

    fn display_name() -> &'static str {
        "CSV import"
    }

    fn description() -> &'static str {
        "Upload a CSV file, check the server-side preview, then import the rows"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usecase_names() {
        assert_eq!(ImportCsv::full_name(), "u508_import_csv");
        assert_eq!(ImportCsv::element_id(), "u508_import_csv--usecase");
    }
}
