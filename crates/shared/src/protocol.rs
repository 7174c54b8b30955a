use serde::{Deserialize, Serialize};

pub const SUMMARIZE_PATH: &str = "/summarize";
pub const EXTRACT_DIAGRAMS_PATH: &str = "/extract-mermaid";
pub const DOWNLOAD_PATH: &str = "/download";
pub const CONVERT_DIAGRAM_PATH: &str = "/convert-mermaid-png";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarizeRequest {
    pub news_text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarizeResponse {
    pub summary: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractDiagramsRequest {
    pub summary: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractDiagramsResponse {
    pub mermaid_diagrams: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadRequest {
    pub summary: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertDiagramRequest {
    pub mermaid_code: String,
    pub diagram_index: usize,
}
