use crate::config::{Config, EVENTS_PATH, TELEMETRY_PATH};
use crate::error::ArdenError;
use crate::models::{AgentEvent, ArdenEvent};
use serde::Serialize;
use tracing::debug;

/// Bearer-authenticated client for the Arden ingestion API.
pub struct TelemetryClient {
    client: reqwest::Client,
    config: Config,
    token: String,
}

impl TelemetryClient {
    /// Fails with [`ArdenError::MissingToken`] before any request is made.
    pub fn new(config: &Config) -> Result<Self, ArdenError> {
        let token = config.require_token()?.to_string();
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("arden/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            config: config.clone(),
            token,
        })
    }

    pub fn host(&self) -> &str {
        &self.config.host
    }

    pub async fn send_telemetry(&self, event: &ArdenEvent) -> Result<(), ArdenError> {
        self.post(TELEMETRY_PATH, event).await
    }

    pub async fn send_event(&self, event: &AgentEvent) -> Result<(), ArdenError> {
        self.post(EVENTS_PATH, event).await
    }

    async fn post<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> Result<(), ArdenError> {
        let url = self.config.endpoint(path);
        debug!(%url, "posting telemetry");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ArdenError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EventBody;
    use std::time::Duration;
    use wiremock::{matchers, Mock, MockServer, ResponseTemplate};

    fn sample_event() -> ArdenEvent {
        ArdenEvent {
            session_id: "session-1".to_string(),
            project_path: "Users/me/proj".to_string(),
            timestamp: "2025-06-01T10:00:00.000Z".to_string(),
            event: EventBody {
                event_type: "assistant".to_string(),
                model: Some("claude-sonnet-4-20250514".to_string()),
                usage: None,
                estimated_cost_micro_cents: None,
            },
        }
    }

    #[test]
    fn test_new_requires_token() {
        let config = Config::resolve(None, None);
        assert!(matches!(
            TelemetryClient::new(&config),
            Err(ArdenError::MissingToken)
        ));
    }

    #[tokio::test]
    async fn test_send_telemetry_posts_with_bearer_token() {
        let mock_server = MockServer::start().await;

        Mock::given(matchers::method("POST"))
            .and(matchers::path("/api/v1/telemetry"))
            .and(matchers::header("authorization", "Bearer test-token"))
            .and(matchers::body_partial_json(serde_json::json!({
                "sessionId": "session-1",
                "projectPath": "Users/me/proj",
                "event": {"type": "assistant"}
            })))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&mock_server)
            .await;

        let config = Config::resolve(Some(mock_server.uri()), Some("test-token".to_string()));
        let client = TelemetryClient::new(&config).unwrap();
        client.send_telemetry(&sample_event()).await.unwrap();
    }

    #[tokio::test]
    async fn test_send_event_uses_events_endpoint() {
        let mock_server = MockServer::start().await;

        Mock::given(matchers::method("POST"))
            .and(matchers::path("/api/v1/events"))
            .and(matchers::body_partial_json(serde_json::json!({
                "agent": "A-1",
                "bid": 10
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        let event = AgentEvent {
            agent: "A-1".to_string(),
            user: "u".to_string(),
            bid: 10,
            mult: 2,
            time: chrono::Utc::now(),
            data: serde_json::json!({"k": 1}),
            metadata: Default::default(),
        };
        let config = Config::resolve(Some(mock_server.uri()), Some("t".to_string()));
        TelemetryClient::new(&config)
            .unwrap()
            .send_event(&event)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_api_error() {
        let mock_server = MockServer::start().await;

        Mock::given(matchers::method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&mock_server)
            .await;

        let config = Config::resolve(Some(mock_server.uri()), Some("t".to_string()));
        let err = TelemetryClient::new(&config)
            .unwrap()
            .send_telemetry(&sample_event())
            .await
            .unwrap_err();

        match err {
            ArdenError::Api { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "boom");
            }
            other => panic!("Expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_request_timeout_is_reported() {
        let mock_server = MockServer::start().await;

        Mock::given(matchers::method("POST"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&mock_server)
            .await;

        let config = Config::resolve(Some(mock_server.uri()), Some("t".to_string()))
            .with_timeout(Duration::from_millis(100));
        let err = TelemetryClient::new(&config)
            .unwrap()
            .send_telemetry(&sample_event())
            .await
            .unwrap_err();

        match err {
            ArdenError::Http(e) => assert!(e.is_timeout()),
            other => panic!("Expected Http timeout, got {:?}", other),
        }
    }
}
