use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Successful body of `POST /api/preview_csv`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewResponse {
    /// Column names; absent or null when the file was sent without a header row
    #[serde(default)]
    pub headers: Option<Vec<String>>,

    /// Short rows come back padded with `null` cells; those read as ""
    #[serde(deserialize_with = "null_cells_as_empty")]
    pub rows: Vec<Vec<String>>,
}

fn null_cells_as_empty<'de, D>(deserializer: D) -> Result<Vec<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let rows: Vec<Vec<Option<String>>> = Vec::deserialize(deserializer)?;
    Ok(rows
        .into_iter()
        .map(|row| row.into_iter().map(Option::unwrap_or_default).collect())
        .collect())
}

impl PreviewResponse {
    pub fn headers(&self) -> &[String] {
        self.headers.as_deref().unwrap_or(&[])
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Successful body of `POST /api/import_csv`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportResponse {
    pub inserted: u64,

    /// Rows rejected by validation plus duplicates
    pub skipped: u64,

    /// Archive of the original file, when the upload to object storage worked
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s3: Option<ArchiveInfo>,

    /// Archive failure; does not make the import itself fail
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s3_error: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub row_errors: Vec<RowError>,
}

impl ImportResponse {
    pub fn archive_url(&self) -> Option<&str> {
        self.s3
            .as_ref()
            .and_then(|s3| s3.url.as_deref())
            .filter(|url| !url.is_empty())
    }

    pub fn archive_error(&self) -> Option<&str> {
        self.s3_error.as_deref().filter(|e| !e.is_empty())
    }
}

/// Presigned link to the archived CSV
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveInfo {
    #[serde(default)]
    pub url: Option<String>,

    /// Object key in the bucket, e.g. "imports/1700000000_sample.csv"
    #[serde(default)]
    pub key: Option<String>,
}

/// Per-row rejection reported by the import call (1-based row numbers)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowError {
    pub row: u64,
    pub reason: String,
}

/// Failure body of both endpoints
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorResponse {
    pub fn message(&self) -> Option<&str> {
        self.error.as_deref().filter(|e| !e.is_empty())
    }

    /// `error` of an arbitrary JSON body, or `fallback` when it is missing,
    /// empty or not a string
    pub fn message_or(body: &Value, fallback: &str) -> String {
        ErrorResponse::deserialize(body)
            .ok()
            .as_ref()
            .and_then(ErrorResponse::message)
            .unwrap_or(fallback)
            .to_string()
    }
}
