use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    #[serde(default)]
    pub symptoms: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub files: Option<Vec<FilePayload>>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FilePayload {
    pub mime_type: String,
    pub data: String,
}

// The types below describe what the model is asked to return. They are only
// used to inspect the parsed reply; the reply itself is relayed untouched.

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub interpretation: String,
    pub temporary_advice: Vec<String>,
    pub recommendations: Vec<Recommendation>,
}
