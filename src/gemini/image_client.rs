use crate::{
    config::GeminiConfig,
    error::{HeadshotError, Result},
    models::{GenerateContentRequest, GenerateContentResponse},
};
use async_trait::async_trait;
use reqwest::header::{HeaderValue, CONTENT_TYPE};

const ERROR_BODY_LIMIT: usize = 200;

/// One `generateContent` round trip. The headshot generator only talks to
/// the API through this trait.
#[async_trait]
pub trait ImageGenerationApi: Send + Sync {
    async fn generate_content(
        &self,
        model: &str,
        api_key: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse>;
}

#[derive(Clone)]
pub struct GeminiImageClient {
    client: reqwest::Client,
    endpoint: String,
}

impl GeminiImageClient {
    pub fn new(config: &GeminiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                HeadshotError::ConfigError(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
        })
    }

    pub fn url_for(&self, model: &str) -> String {
        format!("{}/{}:generateContent", self.endpoint, model)
    }
}

fn truncate(body: &str) -> String {
    match body.char_indices().nth(ERROR_BODY_LIMIT) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

/// Pulls `error.message` out of a Google API error body when present.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| truncate(body))
}

#[async_trait]
impl ImageGenerationApi for GeminiImageClient {
    async fn generate_content(
        &self,
        model: &str,
        api_key: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let key_header = HeaderValue::from_str(api_key)
            .map_err(|e| HeadshotError::ConfigError(format!("Invalid API key header: {}", e)))?;

        log::debug!(
            "POST {} (image {} chars, prompt {} chars)",
            self.url_for(model),
            request.inline_image().map(|i| i.data.len()).unwrap_or(0),
            request.prompt().map(str::len).unwrap_or(0)
        );

        let response = self
            .client
            .post(self.url_for(model))
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .header("x-goog-api-key", key_header)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                log::error!("Gemini request failed to send: {}", e);
                HeadshotError::TransportError(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::error!("Gemini API returned {}", status);
            return Err(HeadshotError::ApiError {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| {
                HeadshotError::ResponseError(format!("Failed to parse Gemini response: {}", e))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    fn content_length(head: &str) -> usize {
        head.lines()
            .filter_map(|line| line.split_once(':'))
            .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
            .and_then(|(_, value)| value.trim().parse().ok())
            .unwrap_or(0)
    }

    /// Serves a single HTTP exchange on a loopback port. Returns the models
    /// endpoint to configure and a handle yielding the raw request text.
    async fn serve_once(
        status: &'static str,
        body: &'static str,
    ) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let endpoint = format!("http://{}/v1beta/models", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut received = Vec::new();
            let mut chunk = [0u8; 4096];
            loop {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                received.extend_from_slice(&chunk[..n]);
                let text = String::from_utf8_lossy(&received);
                if let Some(end) = text.find("\r\n\r\n") {
                    if received.len() >= end + 4 + content_length(&text[..end]) {
                        break;
                    }
                }
            }

            let response = format!(
                "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&received).into_owned()
        });

        (endpoint, handle)
    }

    fn client_for(endpoint: &str) -> GeminiImageClient {
        let mut client =
            GeminiImageClient::new(&GeminiConfig::new().with_endpoint(endpoint)).unwrap();
        // Loopback traffic must not be routed through an ambient HTTP proxy.
        client.client = reqwest::Client::builder().no_proxy().build().unwrap();
        client
    }

    fn sample_request() -> GenerateContentRequest {
        GenerateContentRequest::image_edit(
            "image/png",
            "XYZ",
            "make a headshot".to_string(),
            "1:1",
        )
    }

    #[tokio::test]
    async fn test_generate_content_success() {
        let (endpoint, server) = serve_once(
            "200 OK",
            r#"{"candidates":[{"content":{"parts":[{"inlineData":{"mimeType":"image/png","data":"QUJD"}}]}}]}"#,
        )
        .await;

        let response = client_for(&endpoint)
            .generate_content("m", "key", &sample_request())
            .await
            .unwrap();
        assert_eq!(response.first_inline_image(), Some("QUJD"));

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /v1beta/models/m:generateContent "));
        assert!(request.to_ascii_lowercase().contains("x-goog-api-key: key\r\n"));
        assert!(request.contains(r#""responseModalities":["IMAGE"]"#));
        assert!(request.contains(r#""data":"XYZ""#));
    }

    #[tokio::test]
    async fn test_generate_content_api_error() {
        let (endpoint, server) = serve_once(
            "503 Service Unavailable",
            r#"{"error":{"code":503,"message":"overloaded"}}"#,
        )
        .await;

        let err = client_for(&endpoint)
            .generate_content("m", "key", &sample_request())
            .await
            .unwrap_err();
        server.await.unwrap();
        match err {
            HeadshotError::ApiError { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message, "overloaded");
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_generate_content_undecodable_body() {
        let (endpoint, server) = serve_once("200 OK", "not json").await;

        let err = client_for(&endpoint)
            .generate_content("m", "key", &sample_request())
            .await
            .unwrap_err();
        server.await.unwrap();
        assert!(matches!(err, HeadshotError::ResponseError(_)));
    }

    #[tokio::test]
    async fn test_generate_content_connection_refused() {
        let err = client_for("http://127.0.0.1:1/v1beta/models")
            .generate_content("m", "key", &sample_request())
            .await
            .unwrap_err();
        assert!(err.is_transport());
        assert!(matches!(err, HeadshotError::TransportError(_)));
    }

    #[test]
    fn test_url_for_model() {
        let config = GeminiConfig::new().with_endpoint("http://localhost:9000/v1beta/models/");
        let client = GeminiImageClient::new(&config).unwrap();
        assert_eq!(
            client.url_for("gemini-2.5-flash-image"),
            "http://localhost:9000/v1beta/models/gemini-2.5-flash-image:generateContent"
        );
    }

    #[test]
    fn test_error_message_prefers_api_message() {
        let body =
            r#"{"error":{"code":400,"message":"API key not valid.","status":"INVALID_ARGUMENT"}}"#;
        assert_eq!(error_message(body), "API key not valid.");
    }

    #[test]
    fn test_error_message_truncates_raw_body() {
        let body = "x".repeat(500);
        let message = error_message(&body);
        assert_eq!(message.len(), ERROR_BODY_LIMIT + 3);
        assert!(message.ends_with("..."));
    }
}
