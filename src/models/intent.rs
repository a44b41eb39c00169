use serde::{Deserialize, Serialize};

/// Classification of the user's request as returned by the analysis service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    pub primary_intent: String,
    pub output_type: String,
    pub target_audience: String,
    pub domain: String,
    pub confidence: f64,
    #[serde(default)]
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendSet {
    pub trends: Vec<String>,
    pub summary: String,
    #[serde(default)]
    pub sources: Vec<String>,
}

/// Result of `POST /api/analyze`. Sent back unchanged as the body of
/// `POST /api/generate-prompts`, so every field the service returns is kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub query: String,
    pub intent: Intent,
    pub trends: TrendSet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmation_message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub query: String,
}

impl AnalysisResult {
    pub fn validate(&self) -> Result<(), String> {
        let confidence = self.intent.confidence;
        if !confidence.is_finite() || !(0.0..=1.0).contains(&confidence) {
            return Err(format!(
                "intent.confidence must be within [0, 1], got {}",
                confidence
            ));
        }
        Ok(())
    }
}
