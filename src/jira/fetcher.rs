use crate::model::{Error, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, StatusCode};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// A single authenticated GET. Implementations never retry.
pub trait Fetcher {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String>>;
}

#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl ToString, password: impl ToString) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    pub fn basic_authorization(&self) -> String {
        let token = STANDARD.encode(format!("{}:{}", self.username, self.password));
        format!("Basic {token}")
    }
}

pub struct HttpFetcher {
    client: Client,
    authorization: String,
}

impl HttpFetcher {
    pub fn new(credentials: &Credentials, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(Error::Transport)?;
        Ok(Self {
            client,
            authorization: credentials.basic_authorization(),
        })
    }
}

impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        debug!(url, "GET");
        let response = self
            .client
            .get(url)
            .header(AUTHORIZATION, &self.authorization)
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = response.status();
        if status != StatusCode::OK {
            let reason = status.canonical_reason().unwrap_or_default().to_string();
            let body = response.text().await.unwrap_or_default();
            warn!(url, status = status.as_u16(), %reason, "request rejected");
            return Err(Error::Remote {
                status: status.as_u16(),
                reason,
                body,
            });
        }
        response.text().await.map_err(Error::Transport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn encodes_basic_credentials() {
        let credentials = Credentials::new("your-username", "your-password");
        assert_eq!(
            credentials.basic_authorization(),
            "Basic eW91ci11c2VybmFtZTp5b3VyLXBhc3N3b3Jk"
        );
    }

    #[tokio::test]
    async fn returns_body_of_authenticated_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/agile/1.0/sprint/123"))
            .and(header("authorization", "Basic dXNlcjpwYXNz"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"id":123}"#))
            .expect(1)
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new(&Credentials::new("user", "pass"), None).unwrap();
        let body = fetcher
            .fetch(&format!("{}/rest/agile/1.0/sprint/123", server.uri()))
            .await
            .unwrap();

        assert_eq!(body, r#"{"id":123}"#);
    }

    #[tokio::test]
    async fn non_200_is_a_remote_error_with_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_string("Sprint does not exist"))
            .expect(1)
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new(&Credentials::new("user", "pass"), None).unwrap();
        let error = fetcher
            .fetch(&format!("{}/rest/agile/1.0/sprint/1", server.uri()))
            .await
            .unwrap_err();

        match error {
            Error::Remote { status, reason, body } => {
                assert_eq!(status, 404);
                assert_eq!(reason, "Not Found");
                assert_eq!(body, "Sprint does not exist");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn other_success_codes_are_rejected_too() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new(&Credentials::new("user", "pass"), None).unwrap();
        let error = fetcher.fetch(&server.uri()).await.unwrap_err();

        assert!(matches!(error, Error::Remote { status: 204, .. }));
    }

    #[tokio::test]
    async fn slow_response_past_timeout_is_a_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("{}")
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new(
            &Credentials::new("user", "pass"),
            Some(Duration::from_millis(200)),
        )
        .unwrap();
        let error = fetcher.fetch(&server.uri()).await.unwrap_err();

        match error {
            Error::Transport(source) => assert!(source.is_timeout()),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn unreachable_server_is_a_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let uri = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let fetcher = HttpFetcher::new(
            &Credentials::new("user", "pass"),
            Some(Duration::from_secs(2)),
        )
        .unwrap();
        let error = fetcher.fetch(&uri).await.unwrap_err();

        assert!(matches!(error, Error::Transport(_)));
    }
}
