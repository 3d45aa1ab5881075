use contracts::usecases::u508_import_csv::{
    ImportResponse, PreviewResponse, RowError, ARCHIVE_LINK_TTL_SECS,
};

pub const MSG_PREVIEW_NO_FILE: &str = "Please select a CSV file to upload.";
pub const MSG_IMPORT_NO_FILE: &str = "Please select a CSV file to upload before proceeding.";
pub const MSG_PREVIEW_BUSY: &str = "Uploading & parsing...";
pub const MSG_IMPORT_BUSY: &str = "Importing CSV to server...";
pub const MSG_PREVIEW_UNPARSEABLE: &str = "Unknown error";
pub const MSG_PREVIEW_FAILED: &str = "Upload failed";
pub const MSG_IMPORT_FAILED: &str = "Import failed";
pub const MSG_PREVIEW_NETWORK: &str = "Network or server error while uploading file";
pub const MSG_IMPORT_NETWORK: &str = "Network or server error while importing file";

/// CSV file picked by the user, read into memory once on selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    pub size: u64,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    /// Browsers report an empty type for files with unknown extensions
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        let content_type = content_type.into();
        Self {
            name: name.into(),
            size: bytes.len() as u64,
            content_type: if content_type.is_empty() {
                "text/csv".to_string()
            } else {
                content_type
            },
            bytes,
        }
    }
}

/// What both calls send: the file plus the header flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadSelection {
    pub file: UploadFile,
    pub has_header: bool,
}

impl UploadSelection {
    pub fn new(file: UploadFile, has_header: bool) -> Self {
        Self { file, has_header }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Error,
}

/// The single status line shown above the preview
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub kind: MessageKind,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: MessageKind::Info,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: MessageKind::Error,
        }
    }

    /// CSS class of the message element
    pub fn css_class(&self) -> &'static str {
        match self.kind {
            MessageKind::Info => "info",
            MessageKind::Error => "error",
        }
    }
}

/// Position in the upload-preview-import cycle.
///
/// A failed import goes straight back to `PreviewReady`; the user may retry
/// without previewing again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Previewing,
    PreviewReady,
    Importing,
    Imported,
}

/// Render-ready result of a successful import
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    pub inserted: u64,
    pub skipped: u64,
    pub archive_url: Option<String>,
    pub archive_error: Option<String>,
    pub row_errors: Vec<RowError>,
}

impl ImportSummary {
    pub fn from_response(response: &ImportResponse) -> Self {
        Self {
            inserted: response.inserted,
            skipped: response.skipped,
            archive_url: response.archive_url().map(str::to_string),
            archive_error: response.archive_error().map(str::to_string),
            row_errors: response.row_errors.clone(),
        }
    }

    /// Status line after a successful import
    pub fn completion_message(&self) -> String {
        format!(
            "Import complete: inserted={} skipped={}",
            self.inserted, self.skipped
        )
    }

    pub fn summary_line(&self) -> String {
        format!(
            "Inserted: {}, Skipped (duplicates): {}",
            self.inserted, self.skipped
        )
    }

    /// Text of the archive link
    pub fn archive_link_note(&self) -> String {
        let hours = ARCHIVE_LINK_TTL_SECS / 3600;
        format!(
            "View archived CSV in S3 (expires in {} {})",
            hours,
            if hours == 1 { "hour" } else { "hours" }
        )
    }

    pub fn archive_error_line(&self) -> Option<String> {
        self.archive_error
            .as_ref()
            .map(|e| format!("S3 upload error: {}", e))
    }

    pub fn row_error_lines(&self) -> Vec<String> {
        self.row_errors
            .iter()
            .map(|e| format!("Row {}: {}", e.row, e.reason))
            .collect()
    }
}

/// Everything the view renders. Owned by the controller, cloned out to the view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ControllerState {
    pub phase: Phase,
    /// Set only by a successful preview; cleared when a preview starts or fails
    pub can_proceed: bool,
    pub preview_in_flight: bool,
    pub import_in_flight: bool,
    pub message: Option<StatusMessage>,
    pub preview: Option<PreviewResponse>,
    pub import: Option<ImportSummary>,
}

impl ControllerState {
    pub fn import_enabled(&self) -> bool {
        self.can_proceed && !self.import_in_flight
    }

    pub fn preview_enabled(&self) -> bool {
        !self.preview_in_flight
    }

    /// Rows currently shown in the preview table
    pub fn preview_row_count(&self) -> usize {
        self.preview.as_ref().map_or(0, PreviewResponse::row_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::usecases::u508_import_csv::ArchiveInfo;

    #[test]
    fn test_empty_content_type_defaults_to_csv() {
        let file = UploadFile::new("sample.csv", "", b"a,b\n1,2\n".to_vec());
        assert_eq!(file.content_type, "text/csv");
        assert_eq!(file.size, 8);

        let file = UploadFile::new("sample.csv", "application/vnd.ms-excel", Vec::new());
        assert_eq!(file.content_type, "application/vnd.ms-excel");
    }

    #[test]
    fn test_import_summary_lines() {
        let response = ImportResponse {
            inserted: 10,
            skipped: 2,
            s3: Some(ArchiveInfo {
                url: Some("https://x/y".to_string()),
                key: None,
            }),
            s3_error: Some("upload timeout".to_string()),
            row_errors: vec![RowError {
                row: 4,
                reason: "invalid amount".to_string(),
            }],
        };
        let summary = ImportSummary::from_response(&response);
        assert_eq!(summary.completion_message(), "Import complete: inserted=10 skipped=2");
        assert_eq!(summary.summary_line(), "Inserted: 10, Skipped (duplicates): 2");
        assert_eq!(summary.archive_url.as_deref(), Some("https://x/y"));
        assert_eq!(
            summary.archive_error_line().as_deref(),
            Some("S3 upload error: upload timeout")
        );
        assert_eq!(summary.row_error_lines(), vec!["Row 4: invalid amount".to_string()]);
        assert_eq!(
            summary.archive_link_note(),
            "View archived CSV in S3 (expires in 1 hour)"
        );
    }

    #[test]
    fn test_import_enabled_requires_preview_and_idle_import() {
        let mut state = ControllerState::default();
        assert!(!state.import_enabled());

        state.can_proceed = true;
        assert!(state.import_enabled());

        state.import_in_flight = true;
        assert!(!state.import_enabled());
    }
}
