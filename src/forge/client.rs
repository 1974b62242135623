use crate::forge::ForgeError;
use crate::forge::types::{AnalysisResult, AnalyzeRequest, Problem, ProblemRequest};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

const ANALYZE_CODE: &str = "analyze-code";
const GENERATE_PROBLEM: &str = "generate-problem";

/// Client for the hosted analysis functions. Both endpoints take a JSON body
/// and answer with JSON.
pub struct ForgeClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl ForgeClient {
    pub fn new(base_url: &str, api_key: Option<&str>) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        info!("Forge client initialized ({})", base_url);
        Self {
            client: reqwest::Client::new(),
            base_url,
            api_key: api_key.map(str::to_string),
        }
    }

    pub async fn analyze_code(&self, request: &AnalyzeRequest) -> Result<AnalysisResult, ForgeError> {
        if request.code.trim().is_empty() {
            return Err(ForgeError::EmptyCode);
        }
        let result: AnalysisResult = self.invoke(ANALYZE_CODE, request).await?;
        debug!(
            "Analysis for {} found {} pattern(s)",
            request.user_id,
            result.tags.len()
        );
        Ok(result)
    }

    pub async fn generate_problem(&self, user_id: &str) -> Result<Problem, ForgeError> {
        let request = ProblemRequest {
            user_id: user_id.to_string(),
        };
        self.invoke(GENERATE_PROBLEM, &request).await
    }

    async fn invoke<B: Serialize, T: DeserializeOwned>(
        &self,
        function: &str,
        body: &B,
    ) -> Result<T, ForgeError> {
        let url = format!("{}/{}", self.base_url, function);

        let mut req = self.client.post(&url).json(body);
        if let Some(key) = &self.api_key {
            req = req.bearer_auth(key);
        }

        let resp = req.send().await?;
        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(ForgeError::Api { status, body });
        }

        Ok(resp.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{Value, json};

    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_analyze_code_round_trip() {
        let app = Router::new().route(
            "/analyze-code",
            post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                assert_eq!(body["userId"], "u1");
                assert_eq!(body["language"], "python");
                assert_eq!(headers["authorization"], "Bearer secret");
                Json(json!({
                    "tags": [{
                        "tag": "off-by-one",
                        "explanation": "range end is inclusive",
                        "severity": "high",
                        "line_hint": "for i in range(len(a) + 1)"
                    }],
                    "summary": "One boundary mistake."
                }))
            }),
        );
        let client = ForgeClient::new(&format!("{}/", serve(app).await), Some("secret"));

        let result = client
            .analyze_code(&AnalyzeRequest {
                code: "for i in range(len(a) + 1): pass".to_string(),
                language: "python".to_string(),
                user_id: "u1".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(result.tags.len(), 1);
        assert_eq!(result.tags[0].severity, crate::forge::Severity::High);
        assert_eq!(result.summary, "One boundary mistake.");
    }

    #[tokio::test]
    async fn test_error_status_carries_body() {
        let app = Router::new().route(
            "/generate-problem",
            post(|| async { (StatusCode::TOO_MANY_REQUESTS, "slow down") }),
        );
        let client = ForgeClient::new(&serve(app).await, None);

        match client.generate_problem("u1").await {
            Err(ForgeError::Api { status, body }) => {
                assert_eq!(status, 429);
                assert_eq!(body, "slow down");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_blank_code_rejected_before_call() {
        // nothing listens here; the call must not be attempted
        let client = ForgeClient::new("http://127.0.0.1:9", None);
        let err = client
            .analyze_code(&AnalyzeRequest {
                code: "  \n".to_string(),
                language: "c".to_string(),
                user_id: "u1".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ForgeError::EmptyCode));
    }
}
