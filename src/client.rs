//! Transport seam and the reqwest-backed repository client.
//!
//! Request builders only depend on [`Transport`]: they hand it a fully
//! populated request and get a [`FcrepoResponse`] back. [`FcrepoClient`] is the
//! networked implementation; tests substitute `MockTransport`.

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
#[cfg(any(test, feature = "test-export-mocks"))]
use mockall::automock;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Request;
use url::Url;

use crate::builder::{
    DeleteBuilder, GetBuilder, HeadBuilder, OptionsBuilder, PatchBuilder, PostBuilder, PutBuilder,
};
use crate::error::{FcrepoError, Result};
use crate::response::FcrepoResponse;

/// Executes populated requests against the repository.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `request` (aimed at `uri`) and wrap whatever the repository answers.
    async fn execute_request(&self, uri: &Url, request: Request) -> Result<FcrepoResponse>;
}

#[derive(Debug, Clone)]
pub struct FcrepoClient {
    inner: reqwest::Client,
    throw_exception_on_failure: bool,
}

impl FcrepoClient {
    pub fn builder() -> FcrepoClientBuilder {
        FcrepoClientBuilder::default()
    }

    /// Whether error statuses (>= 400) are turned into [`FcrepoError::OperationFailed`].
    pub fn throws_on_failure(&self) -> bool {
        self.throw_exception_on_failure
    }

    pub fn get(&self, uri: Url) -> GetBuilder<'_> {
        GetBuilder::new(uri, self)
    }

    pub fn head(&self, uri: Url) -> HeadBuilder<'_> {
        HeadBuilder::new(uri, self)
    }

    pub fn options(&self, uri: Url) -> OptionsBuilder<'_> {
        OptionsBuilder::new(uri, self)
    }

    pub fn delete(&self, uri: Url) -> DeleteBuilder<'_> {
        DeleteBuilder::new(uri, self)
    }

    pub fn post(&self, uri: Url) -> PostBuilder<'_> {
        PostBuilder::new(uri, self)
    }

    pub fn put(&self, uri: Url) -> PutBuilder<'_> {
        PutBuilder::new(uri, self)
    }

    pub fn patch(&self, uri: Url) -> PatchBuilder<'_> {
        PatchBuilder::new(uri, self)
    }
}

#[async_trait]
impl Transport for FcrepoClient {
    async fn execute_request(&self, uri: &Url, request: Request) -> Result<FcrepoResponse> {
        let method = request.method().clone();
        tracing::debug!(%method, uri = %uri, "Executing Fcrepo request");

        let response = match self.inner.execute(request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(error = ?e, %method, uri = %uri, "Fcrepo request failed in transport");
                return Err(FcrepoError::Transport(e));
            }
        };
        let response = FcrepoResponse::from_reqwest(response).await?;
        let status = response.status();

        if self.throw_exception_on_failure && (status.is_client_error() || status.is_server_error()) {
            tracing::error!(%method, uri = %uri, status = status.as_u16(), "Fcrepo request returned error status");
            return Err(FcrepoError::OperationFailed {
                url: uri.clone(),
                status_code: i32::from(status.as_u16()),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        tracing::info!(%method, uri = %uri, status = status.as_u16(), "Fcrepo request completed");
        Ok(response)
    }
}

/// Builder for [`FcrepoClient`].
#[derive(Debug, Default)]
pub struct FcrepoClientBuilder {
    credentials: Option<(String, String)>,
    throw_exception_on_failure: bool,
    timeout: Option<Duration>,
}

impl FcrepoClientBuilder {
    /// Send HTTP Basic credentials with every request.
    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.credentials = Some((username.into(), password.into()));
        self
    }

    /// Fail requests answered with a 4xx or 5xx status.
    pub fn throw_exception_on_failure(mut self) -> Self {
        self.throw_exception_on_failure = true;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Result<FcrepoClient> {
        let mut builder = reqwest::Client::builder();

        if let Some((username, password)) = &self.credentials {
            let encoded = base64::engine::general_purpose::STANDARD
                .encode(format!("{username}:{password}"));
            let mut value = HeaderValue::from_str(&format!("Basic {encoded}"))
                .map_err(|e| FcrepoError::InvalidCredentials(e.to_string()))?;
            value.set_sensitive(true);
            let mut defaults = HeaderMap::new();
            defaults.insert(AUTHORIZATION, value);
            builder = builder.default_headers(defaults);
        }
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let inner = builder.build()?;
        tracing::info!(
            authenticated = self.credentials.is_some(),
            throw_exception_on_failure = self.throw_exception_on_failure,
            timeout = ?self.timeout,
            "Initialized FcrepoClient"
        );
        Ok(FcrepoClient {
            inner,
            throw_exception_on_failure: self.throw_exception_on_failure,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults_do_not_throw() {
        let client = FcrepoClient::builder().build().unwrap();
        assert!(!client.throws_on_failure());
    }

    #[test]
    fn builder_applies_options() {
        let client = FcrepoClient::builder()
            .credentials("fedoraAdmin", "secret")
            .throw_exception_on_failure()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        assert!(client.throws_on_failure());
    }

    #[test]
    fn verb_shortcuts_bind_uri() {
        let client = FcrepoClient::builder().build().unwrap();
        let uri = Url::parse("http://localhost:8080/rest/a").unwrap();
        let request = client.delete(uri.clone()).into_request().unwrap();
        assert_eq!(request.method(), reqwest::Method::DELETE);
        assert_eq!(request.url(), &uri);
    }
}
