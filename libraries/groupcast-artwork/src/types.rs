use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Rendered artwork bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtworkData {
    /// Raw image bytes
    pub data: Vec<u8>,
    /// MIME type (e.g., "image/svg+xml")
    pub mime_type: String,
}

impl ArtworkData {
    /// Create new artwork data
    pub fn new(data: Vec<u8>, mime_type: String) -> Self {
        Self { data, mime_type }
    }

    /// Get the data as a base64-encoded string
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.data)
    }

    /// Get the data as a `data:` URI
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.to_base64())
    }
}
