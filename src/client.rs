//! HTTP client for the clinic backend.
//!
//! Every report load is one independent GET: no retries, no caching,
//! no request coalescing. The backend owns the endpoint paths; this
//! module only knows how to call them and how to map the three ways a
//! call can fail.

use std::time::Duration;

use serde::de::DeserializeOwned;
use thiserror::Error;

/// Failures of one report fetch.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The network layer rejected the request: DNS, connection
    /// refused, or the fixed timeout elapsed.
    #[error("cannot reach backend: {0}")]
    Transport(String),

    /// Non-success response status; the code is kept for display.
    #[error("backend returned HTTP {code}")]
    HttpStatus { code: u16 },

    /// The body is not JSON or does not match the report's schema.
    #[error("malformed report payload: {0}")]
    MalformedPayload(String),

    /// The backend answered 200 but embedded an application error.
    #[error("backend reported: {0}")]
    Backend(String),
}

impl FetchError {
    /// Operator-facing toast message for this failure.
    pub fn user_message(&self) -> String {
        match self {
            FetchError::Transport(_) => {
                "Error de conexión. Verifica tu conexión a internet.".to_string()
            }
            FetchError::HttpStatus { code: 500 } => {
                "Error interno del servidor. Contacta al administrador.".to_string()
            }
            FetchError::HttpStatus { code: 404 } => {
                "Recurso no encontrado. Verifica la configuración.".to_string()
            }
            FetchError::HttpStatus { code } => format!("Error inesperado: HTTP {code}"),
            FetchError::MalformedPayload(_) => {
                "Error inesperado: respuesta inválida del servidor.".to_string()
            }
            FetchError::Backend(message) => format!("Error al cargar datos: {message}"),
        }
    }
}

/// Thin wrapper over `reqwest` pinned to the backend's base URL.
pub struct BackendClient {
    base_url: String,
    client: reqwest::Client,
}

impl BackendClient {
    /// Client against `base_url` with a fixed per-request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn from_config(config: &crate::config::DashboardConfig) -> Self {
        Self::new(&config.base_url, config.request_timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a relative endpoint path. Also used by the
    /// export-link builder, which never goes through `get_json`.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// GET `path` with `params` and decode the JSON body into `T`.
    ///
    /// Schema validation happens here, at the fetch boundary: a body
    /// that parses as JSON but does not fit `T` is a
    /// [`FetchError::MalformedPayload`], and no renderer ever sees it.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T, FetchError> {
        let url = self.url_for(path);

        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    FetchError::Transport(format!("request to {url} timed out"))
                } else {
                    FetchError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                code: status.as_u16(),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| FetchError::MalformedPayload(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::routing::get;
    use axum::Router;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Probe {
        value: u32,
    }

    async fn spawn_stub(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind ephemeral port");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("stub serve");
        });
        format!("http://{addr}")
    }

    #[test]
    fn constructor_trims_trailing_slash() {
        let client = BackendClient::new("http://localhost:8000/", Duration::from_secs(10));
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(
            client.url_for("reports/daily-cash/"),
            "http://localhost:8000/reports/daily-cash/"
        );
    }

    #[test]
    fn url_for_tolerates_leading_slash() {
        let client = BackendClient::new("http://localhost:8000", Duration::from_secs(10));
        assert_eq!(
            client.url_for("/reports/daily-cash/"),
            "http://localhost:8000/reports/daily-cash/"
        );
    }

    #[tokio::test]
    async fn decodes_success_body() {
        let base = spawn_stub(Router::new().route("/probe/", get(|| async { r#"{"value":7}"# })))
            .await;
        let client = BackendClient::new(&base, Duration::from_secs(5));

        let probe: Probe = client.get_json("probe/", &[]).await.unwrap();
        assert_eq!(probe.value, 7);
    }

    #[tokio::test]
    async fn non_success_status_carries_code() {
        let base = spawn_stub(Router::new().route(
            "/probe/",
            get(|| async { (axum::http::StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        ))
        .await;
        let client = BackendClient::new(&base, Duration::from_secs(5));

        let err = client.get_json::<Probe>("probe/", &[]).await.unwrap_err();
        match err {
            FetchError::HttpStatus { code } => assert_eq!(code, 500),
            other => panic!("expected HttpStatus, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_json_body_is_malformed_payload() {
        let base =
            spawn_stub(Router::new().route("/probe/", get(|| async { "<html>login</html>" })))
                .await;
        let client = BackendClient::new(&base, Duration::from_secs(5));

        let err = client.get_json::<Probe>("probe/", &[]).await.unwrap_err();
        assert!(matches!(err, FetchError::MalformedPayload(_)));
    }

    #[tokio::test]
    async fn schema_mismatch_is_malformed_payload() {
        let base = spawn_stub(Router::new().route(
            "/probe/",
            get(|| async { r#"{"value":"not a number"}"# }),
        ))
        .await;
        let client = BackendClient::new(&base, Duration::from_secs(5));

        let err = client.get_json::<Probe>("probe/", &[]).await.unwrap_err();
        assert!(matches!(err, FetchError::MalformedPayload(_)));
    }

    #[tokio::test]
    async fn refused_connection_is_transport_error() {
        // Reserved port with no listener.
        let client = BackendClient::new("http://127.0.0.1:1", Duration::from_secs(5));

        let err = client.get_json::<Probe>("probe/", &[]).await.unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));
        assert_eq!(
            err.user_message(),
            "Error de conexión. Verifica tu conexión a internet."
        );
    }

    #[test]
    fn user_messages_by_status() {
        assert_eq!(
            FetchError::HttpStatus { code: 500 }.user_message(),
            "Error interno del servidor. Contacta al administrador."
        );
        assert_eq!(
            FetchError::HttpStatus { code: 404 }.user_message(),
            "Recurso no encontrado. Verifica la configuración."
        );
        assert_eq!(
            FetchError::HttpStatus { code: 403 }.user_message(),
            "Error inesperado: HTTP 403"
        );
    }
}
