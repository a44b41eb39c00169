use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::WizardError;
use crate::models::{
    AnalysisResult, AnalyzeRequest, GeneratePromptsResponse, StrategyCatalog, StrategySummary,
};

pub const ANALYZE_FALLBACK: &str = "분석 실패";
pub const GENERATE_FALLBACK: &str = "프롬프트 생성 실패";
pub const STRATEGIES_FALLBACK: &str = "전략 목록 조회 실패";
pub const HEALTH_FALLBACK: &str = "헬스 체크 실패";

/// Remote side of the wizard: analysis, prompt generation and the
/// strategy catalogue.
#[async_trait]
pub trait PromptService: Send + Sync {
    async fn analyze(&self, query: &str) -> Result<AnalysisResult, WizardError>;

    async fn generate_prompts(
        &self,
        analysis: &AnalysisResult,
    ) -> Result<GeneratePromptsResponse, WizardError>;

    async fn list_strategies(&self) -> Result<Vec<StrategySummary>, WizardError>;

    async fn health(&self) -> Result<String, WizardError>;
}

#[derive(Debug, Clone)]
pub struct HttpPromptService {
    client: Client,
    base_url: String,
}

#[derive(Deserialize)]
struct HealthResponse {
    status: String,
}

impl HttpPromptService {
    pub fn new(base_url: impl Into<String>) -> Result<Self, WizardError> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl PromptService for HttpPromptService {
    async fn analyze(&self, query: &str) -> Result<AnalysisResult, WizardError> {
        log::info!("Requesting analysis ({} chars)", query.chars().count());
        let response = self
            .client
            .post(self.url("/api/analyze"))
            .json(&AnalyzeRequest {
                query: query.to_string(),
            })
            .send()
            .await?;

        let result: AnalysisResult = read_json(response, ANALYZE_FALLBACK).await?;
        result.validate().map_err(WizardError::Schema)?;
        Ok(result)
    }

    async fn generate_prompts(
        &self,
        analysis: &AnalysisResult,
    ) -> Result<GeneratePromptsResponse, WizardError> {
        log::info!("Requesting prompt strategies for \"{}\"", analysis.query);
        let response = self
            .client
            .post(self.url("/api/generate-prompts"))
            .json(analysis)
            .send()
            .await?;

        let result: GeneratePromptsResponse = read_json(response, GENERATE_FALLBACK).await?;
        result.prompts.validate().map_err(WizardError::Schema)?;
        Ok(result)
    }

    async fn list_strategies(&self) -> Result<Vec<StrategySummary>, WizardError> {
        let response = self.client.get(self.url("/api/strategies")).send().await?;
        let catalog: StrategyCatalog = read_json(response, STRATEGIES_FALLBACK).await?;
        Ok(catalog.strategies)
    }

    async fn health(&self) -> Result<String, WizardError> {
        let response = self.client.get(self.url("/health")).send().await?;
        let health: HealthResponse = read_json(response, HEALTH_FALLBACK).await?;
        Ok(health.status)
    }
}

async fn read_json<T: DeserializeOwned>(
    response: reqwest::Response,
    fallback: &str,
) -> Result<T, WizardError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        let message = server_message(&body).unwrap_or_else(|| fallback.to_string());
        log::warn!("Service returned {}: {}", status, message);
        return Err(WizardError::Server {
            status: status.as_u16(),
            message,
        });
    }

    Ok(serde_json::from_str(&body)?)
}

/// Error text from a failure body: `{"error": ...}`, else FastAPI's
/// `{"detail": ...}`. Blank strings count as absent.
pub(crate) fn server_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["error", "detail"]
        .iter()
        .filter_map(|key| value.get(*key).and_then(|v| v.as_str()))
        .find(|msg| !msg.trim().is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_field_preferred_over_detail() {
        let body = r#"{"error": "쿼리가 너무 짧습니다", "detail": "other"}"#;
        assert_eq!(server_message(body).as_deref(), Some("쿼리가 너무 짧습니다"));
    }

    #[test]
    fn detail_used_when_error_missing_or_blank() {
        assert_eq!(
            server_message(r#"{"detail": "분석 실패: timeout"}"#).as_deref(),
            Some("분석 실패: timeout")
        );
        assert_eq!(
            server_message(r#"{"error": "", "detail": "d"}"#).as_deref(),
            Some("d")
        );
    }

    #[test]
    fn unusable_bodies_give_none() {
        assert_eq!(server_message("<html>502</html>"), None);
        assert_eq!(server_message(r#"{"error": 42}"#), None);
        assert_eq!(server_message("{}"), None);
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let service = HttpPromptService::new("http://localhost:8000/").unwrap();
        assert_eq!(service.url("/api/analyze"), "http://localhost:8000/api/analyze");
    }
}
