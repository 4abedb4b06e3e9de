use std::time::Duration;

use async_trait::async_trait;
use mcbeacon_config::{BeaconConfig, LogType, PlayersMode};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::api::{PlayerSnapshot, StatusApi, StatusResponse};
use crate::error::StatusError;

#[derive(Debug, Clone, PartialEq, Eq)]
enum PlayersSource {
    /// Same control endpoint, `?action=players`.
    Endpoint,
    /// Separate API next to the game server.
    Direct(String),
}

/// Client for the control endpoint. Every action is a `GET` with an
/// `action` query parameter.
#[derive(Debug, Clone)]
pub struct HttpStatusApi {
    client: Client,
    endpoint: String,
    players: PlayersSource,
}

impl HttpStatusApi {
    pub fn new(endpoint: &str, request_timeout: Duration) -> Result<Self, StatusError> {
        let client = Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| StatusError::transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(HttpStatusApi {
            client,
            endpoint: endpoint.to_string(),
            players: PlayersSource::Endpoint,
        })
    }

    pub fn with_direct_players(mut self, url: &str) -> Self {
        self.players = PlayersSource::Direct(url.to_string());
        self
    }

    pub fn from_config(config: &BeaconConfig) -> Result<Self, StatusError> {
        let api = Self::new(&config.endpoint, config.timing.request_timeout)?;
        match (config.players.mode, config.players.url.as_deref()) {
            (PlayersMode::Direct, Some(url)) => Ok(api.with_direct_players(url)),
            _ => Ok(api),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn action(&self, action: &str) -> RequestBuilder {
        self.client
            .get(&self.endpoint)
            .query(&[("action", action)])
            .header("Accept", "application/json")
    }

    async fn fetch_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        what: &str,
    ) -> Result<T, StatusError> {
        let response = request
            .send()
            .await
            .map_err(|e| StatusError::transport(format!("Failed to {}: {}", what, e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| StatusError::transport(format!("Failed to read {} body: {}", what, e)))?;

        if !status.is_success() {
            return Err(StatusError::Http {
                status: status.as_u16(),
                body,
            });
        }

        debug!(log_type = LogType::Api.as_str(), "Response to {}: {}", what, body);

        serde_json::from_str(&body)
            .map_err(|e| StatusError::decode(format!("Failed to parse {} response: {}", what, e)))
    }
}

#[async_trait]
impl StatusApi for HttpStatusApi {
    async fn status(&self) -> Result<StatusResponse, StatusError> {
        self.fetch_json(self.action("status"), "get server status")
            .await
    }

    async fn start(&self) -> Result<serde_json::Value, StatusError> {
        self.fetch_json(self.action("start"), "start server").await
    }

    async fn players(&self) -> Result<PlayerSnapshot, StatusError> {
        let request = match &self.players {
            PlayersSource::Endpoint => self.action("players"),
            PlayersSource::Direct(url) => self.client.get(url).header("Accept", "application/json"),
        };
        self.fetch_json(request, "get players").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcbeacon_config::parse_config;
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path, query_param},
    };

    fn client_for(mock_server: &MockServer) -> HttpStatusApi {
        HttpStatusApi::new(&format!("{}/mc", mock_server.uri()), Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_from_config_uses_endpoint_players_by_default() {
        let config = parse_config("endpoint: https://control.example.org/\n").unwrap();
        let api = HttpStatusApi::from_config(&config).unwrap();

        assert_eq!(api.endpoint(), "https://control.example.org/");
        assert_eq!(api.players, PlayersSource::Endpoint);
    }

    #[test]
    fn test_from_config_direct_players() {
        let config = parse_config(
            "endpoint: https://control.example.org/\nplayers:\n  mode: direct\n  url: http://play.example.org:8080/\n",
        )
        .unwrap();
        let api = HttpStatusApi::from_config(&config).unwrap();

        assert_eq!(
            api.players,
            PlayersSource::Direct("http://play.example.org:8080/".to_string())
        );
    }

    #[test]
    fn test_action_query() {
        let api = HttpStatusApi::new("https://control.example.org/", Duration::from_secs(1)).unwrap();
        let request = api.action("status").build().unwrap();

        assert_eq!(
            request.url().as_str(),
            "https://control.example.org/?action=status"
        );
    }

    #[tokio::test]
    async fn test_status_success() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/mc"))
            .and(query_param("action", "status"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "status": "running", "ip": "1.2.3.4" })),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let response = client_for(&mock_server).status().await.unwrap();
        assert_eq!(response, StatusResponse::new("running").with_ip("1.2.3.4"));
    }

    #[tokio::test]
    async fn test_non_success_status_is_http_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("action", "start"))
            .respond_with(ResponseTemplate::new(503).set_body_string("lambda cold"))
            .mount(&mock_server)
            .await;

        let result = client_for(&mock_server).start().await;
        match result {
            Err(StatusError::Http { status, body }) => {
                assert_eq!(status, 503);
                assert_eq!(body, "lambda cold");
            }
            other => panic!("expected an HTTP error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_non_json_body_is_decode_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("action", "status"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&mock_server)
            .await;

        let result = client_for(&mock_server).status().await;
        assert!(matches!(result, Err(StatusError::Decode(_))));
    }

    #[tokio::test]
    async fn test_missing_status_field_is_decode_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("action", "status"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ip": "1.2.3.4" })))
            .mount(&mock_server)
            .await;

        let result = client_for(&mock_server).status().await;
        assert!(matches!(result, Err(StatusError::Decode(_))));
    }

    #[tokio::test]
    async fn test_players_from_endpoint() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/mc"))
            .and(query_param("action", "players"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                json!({ "online": 1, "max": 20, "players": ["Alice"] }),
            ))
            .expect(1)
            .mount(&mock_server)
            .await;

        let snapshot = client_for(&mock_server).players().await.unwrap();
        assert_eq!(snapshot, PlayerSnapshot::new(1, 20, &["Alice"]));
    }

    #[tokio::test]
    async fn test_direct_players_skip_the_endpoint() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/players"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                json!({ "online": 2, "max": 10, "players": ["Alice", "Bob"] }),
            ))
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(query_param("action", "players"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let api = client_for(&mock_server)
            .with_direct_players(&format!("{}/players", mock_server.uri()));
        let snapshot = api.players().await.unwrap();
        assert_eq!(snapshot.players, ["Alice", "Bob"]);
    }

    #[tokio::test]
    async fn test_request_timeout_is_transport_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "status": "running" }))
                    .set_delay(Duration::from_secs(30)),
            )
            .mount(&mock_server)
            .await;

        let api = HttpStatusApi::new(
            &format!("{}/mc", mock_server.uri()),
            Duration::from_millis(200),
        )
        .unwrap();
        assert!(matches!(api.status().await, Err(StatusError::Transport(_))));
    }
}
