//! Shared client utilities, error types, and logging setup for the CLI.

use std::fmt::{self, Display, Formatter};
use std::time::Duration;

use anyhow::anyhow;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use skyvault_api_models::{error_message, paths};
use tracing_subscriber::fmt as log_fmt;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::Cli;
use crate::session::{SessionFile, SessionRead};

pub(crate) const HEADER_REQUEST_ID: &str = "x-request-id";
/// Default log filter; keeps command output free of log lines.
pub(crate) const DEFAULT_LOG_LEVEL: &str = "warn";

/// CLI-level error type to distinguish validation from operational failures.
#[derive(Debug)]
pub(crate) enum CliError {
    Validation(String),
    Failure(anyhow::Error),
}

/// Convenience alias for functions returning a `CliError`.
pub(crate) type CliResult<T> = Result<T, CliError>;

impl CliError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub(crate) fn failure(error: impl Into<anyhow::Error>) -> Self {
        Self::Failure(error.into())
    }

    pub(crate) const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => 2,
            Self::Failure(_) => 3,
        }
    }

    pub(crate) fn display_message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::Failure(error) => format!("{error:#}"),
        }
    }
}

impl Display for CliError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str("cli error")
    }
}

impl std::error::Error for CliError {}

/// Dependencies constructed from environment flags and CLI options.
#[derive(Clone)]
pub(crate) struct CliDependencies {
    pub(crate) client: Client,
}

impl CliDependencies {
    /// Construct a configured HTTP client tagged with the invocation's trace id.
    pub(crate) fn from_env(cli: &Cli, trace_id: &str) -> CliResult<Self> {
        let mut default_headers = HeaderMap::new();
        let request_id = HeaderValue::from_str(trace_id).map_err(|_| {
            CliError::failure(anyhow!("trace identifier contains invalid characters"))
        })?;
        default_headers.insert(HEADER_REQUEST_ID, request_id);

        let client = Client::builder()
            .timeout(Duration::from_secs(cli.timeout))
            .default_headers(default_headers)
            .build()
            .map_err(|err| CliError::failure(anyhow!("failed to build HTTP client: {err}")))?;

        Ok(Self { client })
    }
}

/// Application context passed to command handlers.
pub(crate) struct AppContext {
    pub(crate) client: Client,
    pub(crate) base_url: Url,
    pub(crate) session: SessionFile,
}

impl AppContext {
    /// Absolute URL for an endpoint path.
    pub(crate) fn endpoint(&self, path: &str) -> CliResult<Url> {
        paths::join(self.base_url.as_str(), path)
            .parse()
            .map_err(|err| CliError::failure(anyhow!("invalid base URL: {err}")))
    }

    /// Bearer token of the stored session.
    ///
    /// A corrupted session file is removed and reported like a missing one.
    pub(crate) fn token(&self) -> CliResult<String> {
        match self.session.read()? {
            SessionRead::Present(stored) => Ok(stored.token),
            SessionRead::Corrupted => {
                tracing::warn!(path = %self.session.path().display(), "discarding corrupted session file");
                self.session.clear()?;
                Err(not_logged_in())
            }
            SessionRead::Missing => Err(not_logged_in()),
        }
    }

    /// `GET` an authenticated endpoint and decode its JSON body.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        fallback: &str,
    ) -> CliResult<T> {
        let token = self.token()?;
        let url = self.endpoint(path)?;
        let response = send(self.client.get(url).bearer_auth(token), path).await?;
        read_json(response, fallback).await
    }

    /// `DELETE` an authenticated endpoint and return the successful response.
    pub(crate) async fn delete(&self, path: &str, fallback: &str) -> CliResult<Response> {
        let token = self.token()?;
        let url = self.endpoint(path)?;
        let response = send(self.client.delete(url).bearer_auth(token), path).await?;
        ensure_success(response, fallback).await
    }
}

pub(crate) fn not_logged_in() -> CliError {
    CliError::validation("not logged in (run `skyvault login` first)")
}

/// Send a request, mapping transport failures.
pub(crate) async fn send(request: RequestBuilder, label: &str) -> CliResult<Response> {
    tracing::debug!(endpoint = label, "sending request");
    request
        .send()
        .await
        .map_err(|err| CliError::failure(anyhow!("request to {label} failed: {err}")))
}

/// Pass a successful response through, or classify the failure.
pub(crate) async fn ensure_success(response: Response, fallback: &str) -> CliResult<Response> {
    if response.status().is_success() {
        Ok(response)
    } else {
        Err(classify_problem(response, fallback).await)
    }
}

/// Decode a successful JSON response, or classify the failure.
pub(crate) async fn read_json<T: DeserializeOwned>(
    response: Response,
    fallback: &str,
) -> CliResult<T> {
    ensure_success(response, fallback)
        .await?
        .json::<T>()
        .await
        .map_err(|err| CliError::failure(anyhow!("unexpected response body: {err}")))
}

/// Parse the API URL provided to the CLI.
pub(crate) fn parse_url(input: &str) -> Result<Url, String> {
    input
        .parse::<Url>()
        .map_err(|err| format!("invalid URL '{input}': {err}"))
}

/// Classify an HTTP error response into a CLI error.
pub(crate) async fn classify_problem(response: Response, fallback: &str) -> CliError {
    let status = response.status();
    let bytes = response.bytes().await.unwrap_or_default();
    let message = error_message(&bytes, fallback);

    if matches!(
        status,
        StatusCode::BAD_REQUEST | StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY
    ) {
        CliError::validation(message)
    } else {
        CliError::failure(anyhow!("{message} (status {status})"))
    }
}

/// Install the global tracing subscriber on stderr.
///
/// `RUST_LOG` wins over `level`. Debug builds log human-readable lines,
/// release builds log JSON.
///
/// # Errors
///
/// Returns an error if a subscriber is already installed.
pub(crate) fn init_logging(level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let registry = tracing_subscriber::registry().with(filter);
    let installed = if cfg!(debug_assertions) {
        registry
            .with(
                log_fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false),
            )
            .try_init()
    } else {
        registry
            .with(
                log_fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(false),
            )
            .try_init()
    };
    installed.map_err(|err| anyhow!("failed to install tracing subscriber: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    #[tokio::test]
    async fn validation_statuses_map_to_validation_errors() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/api/auth/register");
            then.status(422)
                .header("content-type", "application/json")
                .json_body(json!({"detail": [{"loc": ["body", "email"], "msg": "value is not a valid email address"}]}));
        });

        let response = Client::new()
            .post(format!("{}/api/auth/register", server.base_url()))
            .send()
            .await
            .expect("response");
        let err = classify_problem(response, "Registration failed").await;

        assert_eq!(err.exit_code(), 2);
        assert_eq!(err.display_message(), "value is not a valid email address");
    }

    #[tokio::test]
    async fn other_statuses_fall_back_and_carry_the_code() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/api/files/storage");
            then.status(500).body("boom");
        });

        let response = Client::new()
            .get(format!("{}/api/files/storage", server.base_url()))
            .send()
            .await
            .expect("response");
        let err = classify_problem(response, "Failed to fetch storage").await;

        assert_eq!(err.exit_code(), 3);
        assert!(
            err.display_message()
                .starts_with("Failed to fetch storage (status 500")
        );
    }

    #[test]
    fn endpoint_keeps_base_path_prefix() {
        let dir = tempfile::tempdir().expect("tempdir");
        let ctx = AppContext {
            client: Client::new(),
            base_url: "http://files.example/skyvault/".parse().expect("url"),
            session: SessionFile::new(dir.path().join("session.json")),
        };
        let url = ctx.endpoint(&paths::history(5)).expect("endpoint");
        assert_eq!(
            url.as_str(),
            "http://files.example/skyvault/api/auth/history?limit=5"
        );
    }

    #[test]
    fn logging_installs_a_single_subscriber() {
        init_logging(DEFAULT_LOG_LEVEL).expect("first install");
        let err = init_logging("debug").expect_err("second install");
        assert!(err.to_string().contains("tracing subscriber"));
    }

    #[test]
    fn missing_session_is_a_validation_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let ctx = AppContext {
            client: Client::new(),
            base_url: "http://127.0.0.1:8000".parse().expect("url"),
            session: SessionFile::new(dir.path().join("session.json")),
        };
        let err = ctx.token().expect_err("no session");
        assert_eq!(err.exit_code(), 2);
    }
}
