//! Multipart form sent to both the preview and the import endpoint.
//!
//! The form carries two parts: the binary `file` part (with file name and
//! content type) and the text `has_header` part. The header flag travels as
//! the string "1" or "0"; servers already deployed depend on that encoding.

/// Name of the binary part holding the CSV file
pub const FIELD_FILE: &str = "file";

/// Name of the text part holding the header flag
pub const FIELD_HAS_HEADER: &str = "has_header";

pub fn encode_has_header(has_header: bool) -> &'static str {
    if has_header {
        "1"
    } else {
        "0"
    }
}

/// Text parts of the upload form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvUploadForm {
    pub has_header: bool,
}

impl CsvUploadForm {
    pub fn new(has_header: bool) -> Self {
        Self { has_header }
    }

    /// (name, value) pairs to append after the `file` part
    pub fn text_fields(&self) -> [(&'static str, &'static str); 1] {
        [(FIELD_HAS_HEADER, encode_has_header(self.has_header))]
    }
}
