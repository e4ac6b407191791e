use super::engine::{Classification, Classifier};
use super::error::ClassifierError;
use crate::models::config::ServerConfig;
use crate::models::pixel_grid::PixelGrid;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Fallback message when the server reports failure without saying why
const DEFAULT_SERVER_ERROR: &str = "Server error";

/// HTTP client for the remote digit classification endpoint
#[derive(Clone)]
pub struct HttpClassifier {
    client: reqwest::Client,
    upload_url: String,
    health_url: String,
}

#[derive(Serialize)]
struct UploadRequest<'a> {
    pixels: &'a PixelGrid,
}

/// Raw upload response; every field but `ok` is optional on the wire
#[derive(Deserialize, Debug)]
struct UploadResponse {
    ok: bool,
    pred: Option<i64>,
    probs: Option<Vec<f64>>,
    time_ms: Option<f64>,
    error: Option<String>,
}

#[derive(Deserialize)]
struct HealthResponse {
    ok: bool,
    msg: Option<String>,
}

impl UploadResponse {
    /// Turn the wire response into a validated classification
    fn into_classification(self) -> Result<Classification, ClassifierError> {
        if !self.ok {
            return Err(ClassifierError::Server(
                self.error
                    .filter(|e| !e.is_empty())
                    .unwrap_or_else(|| DEFAULT_SERVER_ERROR.to_string()),
            ));
        }

        let pred = self
            .pred
            .ok_or_else(|| ClassifierError::MalformedResponse("missing 'pred'".to_string()))?;
        let pred = u8::try_from(pred).map_err(|_| {
            ClassifierError::MalformedResponse(format!("'pred' out of range: {}", pred))
        })?;

        let probs = self
            .probs
            .filter(|p| !p.is_empty())
            .ok_or_else(|| ClassifierError::MalformedResponse("missing 'probs'".to_string()))?;

        let time_ms = self.time_ms.map(|t| t.max(0.0).round() as u64).unwrap_or(0);

        Ok(Classification {
            pred,
            probs,
            time_ms,
        })
    }
}

impl HttpClassifier {
    /// Create a new client for the configured endpoint
    ///
    /// No timeout is applied unless `timeout_secs` is set.
    pub fn new(config: &ServerConfig) -> Result<Self, String> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let client = builder
            .build()
            .map_err(|e| format!("Failed to create HTTP client: {}", e))?;

        Ok(Self {
            client,
            upload_url: config.upload_url(),
            health_url: config.health_url(),
        })
    }

    pub fn upload_url(&self) -> &str {
        &self.upload_url
    }
}

#[async_trait]
impl Classifier for HttpClassifier {
    async fn classify(&self, grid: &PixelGrid) -> Result<Classification, ClassifierError> {
        debug!(url = %self.upload_url, "posting pixel grid");

        let response = self
            .client
            .post(&self.upload_url)
            .json(&UploadRequest { pixels: grid })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        // The endpoint reports validation failures as JSON with a 400 status,
        // so the body is parsed before the status is looked at.
        match serde_json::from_str::<UploadResponse>(&body) {
            Ok(data) => data.into_classification(),
            Err(e) if status.is_success() => {
                Err(ClassifierError::MalformedResponse(e.to_string()))
            }
            Err(_) => {
                warn!(%status, "classifier returned non-JSON error body");
                let detail = body.trim();
                Err(ClassifierError::Server(if detail.is_empty() {
                    format!("HTTP {}", status)
                } else {
                    format!("HTTP {}: {}", status, detail)
                }))
            }
        }
    }

    async fn health_check(&self) -> Result<String, ClassifierError> {
        let response = self.client.get(&self.health_url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClassifierError::Server(format!("HTTP {}", status)));
        }

        let data: HealthResponse = response
            .json()
            .await
            .map_err(|e| ClassifierError::MalformedResponse(e.to_string()))?;

        if !data.ok {
            return Err(ClassifierError::Server(DEFAULT_SERVER_ERROR.to_string()));
        }

        Ok(data.msg.unwrap_or_else(|| "ok".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::pixel_grid::GRID_LEN;
    use crate::services::classifier::test_support::serve_once;

    fn client_for(base_url: &str) -> HttpClassifier {
        HttpClassifier::new(&ServerConfig {
            base_url: base_url.to_string(),
            timeout_secs: Some(5),
            ..ServerConfig::default()
        })
        .unwrap()
    }

    fn grid() -> PixelGrid {
        PixelGrid::from_values(vec![12.5; GRID_LEN]).unwrap()
    }

    #[test]
    fn test_upload_response_ok() {
        let data: UploadResponse = serde_json::from_str(
            r#"{"ok":true,"pred":7,"probs":[0.1,0.9],"time_ms":3}"#,
        )
        .unwrap();

        let result = data.into_classification().unwrap();
        assert_eq!(result.pred, 7);
        assert_eq!(result.probs, vec![0.1, 0.9]);
        assert_eq!(result.time_ms, 3);
    }

    #[test]
    fn test_ranking_agrees_with_server_pred_on_near_tie() {
        let data: UploadResponse = serde_json::from_str(
            r#"{"ok":true,"pred":1,"probs":[0.30000001,0.30000002,0.1,0.1,0.1,0.05,0.05,0.0,0.0,0.0]}"#,
        )
        .unwrap();

        let result = data.into_classification().unwrap();
        assert_ne!(result.probs[0], result.probs[1]);

        let ranked = crate::services::rank::top_k(&result.probs, 3);
        assert_eq!(ranked.best().unwrap().digit, result.pred);
    }

    #[test]
    fn test_upload_response_not_ok() {
        let data: UploadResponse =
            serde_json::from_str(r#"{"ok":false,"error":"Expected 'pixels' length 784"}"#).unwrap();
        assert_eq!(
            data.into_classification().unwrap_err(),
            ClassifierError::Server("Expected 'pixels' length 784".to_string())
        );

        let data: UploadResponse = serde_json::from_str(r#"{"ok":false}"#).unwrap();
        assert_eq!(
            data.into_classification().unwrap_err().to_string(),
            "Server error"
        );
    }

    #[test]
    fn test_upload_response_missing_fields() {
        let data: UploadResponse = serde_json::from_str(r#"{"ok":true,"pred":1}"#).unwrap();
        assert!(matches!(
            data.into_classification(),
            Err(ClassifierError::MalformedResponse(_))
        ));

        let data: UploadResponse =
            serde_json::from_str(r#"{"ok":true,"pred":-1,"probs":[1.0]}"#).unwrap();
        assert!(matches!(
            data.into_classification(),
            Err(ClassifierError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_upload_response_fractional_time() {
        let data: UploadResponse =
            serde_json::from_str(r#"{"ok":true,"pred":0,"probs":[1.0],"time_ms":2.6}"#).unwrap();
        assert_eq!(data.into_classification().unwrap().time_ms, 3);
    }

    #[test]
    fn test_urls_from_config() {
        let client = client_for("http://127.0.0.1:5000/");
        assert_eq!(client.upload_url(), "http://127.0.0.1:5000/upload");
        assert_eq!(client.health_url, "http://127.0.0.1:5000/hello");
    }

    #[tokio::test]
    async fn test_classify_posts_pixels() {
        let (base_url, request) = serve_once(
            "200 OK",
            r#"{"ok":true,"pred":3,"probs":[0,0,0,1,0,0,0,0,0,0],"time_ms":1}"#,
        )
        .await;

        let result = client_for(&base_url).classify(&grid()).await.unwrap();
        assert_eq!(result.pred, 3);
        assert_eq!(result.probs.len(), 10);

        let request = request.await.unwrap();
        assert!(request.head.starts_with("POST /upload "));
        let body: serde_json::Value = serde_json::from_str(&request.body).unwrap();
        assert_eq!(body["pixels"].as_array().unwrap().len(), GRID_LEN);
        assert_eq!(body["pixels"][0], 12.5);
    }

    #[tokio::test]
    async fn test_classify_reads_error_body_on_400() {
        let (base_url, _request) = serve_once(
            "400 Bad Request",
            r#"{"ok":false,"error":"Expected 'pixels' length 784"}"#,
        )
        .await;

        let err = client_for(&base_url).classify(&grid()).await.unwrap_err();
        assert_eq!(err.to_string(), "Expected 'pixels' length 784");
    }

    #[tokio::test]
    async fn test_classify_non_json_error() {
        let (base_url, _request) = serve_once("500 Internal Server Error", "boom").await;

        let err = client_for(&base_url).classify(&grid()).await.unwrap_err();
        assert_eq!(
            err,
            ClassifierError::Server("HTTP 500 Internal Server Error: boom".to_string())
        );
    }

    #[tokio::test]
    async fn test_classify_garbage_success_body() {
        let (base_url, _request) = serve_once("200 OK", "<html></html>").await;

        let err = client_for(&base_url).classify(&grid()).await.unwrap_err();
        assert!(matches!(err, ClassifierError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_classify_unreachable() {
        // Grab a free port, then close it so the connection is refused
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client_for(&format!("http://{}", addr))
            .classify(&grid())
            .await
            .unwrap_err();
        assert!(matches!(err, ClassifierError::Network(_)));
        assert!(err.to_string().starts_with("Request failed"));
    }

    #[tokio::test]
    async fn test_health_check() {
        let (base_url, request) = serve_once("200 OK", r#"{"ok":true,"msg":"Hello from Flask!"}"#).await;

        let msg = client_for(&base_url).health_check().await.unwrap();
        assert_eq!(msg, "Hello from Flask!");
        assert!(request.await.unwrap().head.starts_with("GET /hello "));
    }
}
