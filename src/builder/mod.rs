//! Fluent per-verb request builders.
//!
//! Each builder is created for one operation, configured with chained calls
//! and consumed by `perform()`, so a sent builder cannot be touched again.
//! Write verbs (POST, PUT, PATCH) share body, digest and precondition
//! handling through [`BodyRequestBuilder`].

mod body;
mod delete;
mod get;
mod head;
mod options;
mod patch;
mod post;
mod put;

pub use body::BodyRequestBuilder;
pub use delete::DeleteBuilder;
pub use get::GetBuilder;
pub use head::HeadBuilder;
pub use options::OptionsBuilder;
pub use patch::PatchBuilder;
pub use post::PostBuilder;
pub use put::PutBuilder;

use reqwest::Request;
use url::form_urlencoded;
use url::Url;

use crate::client::Transport;
use crate::error::Result;
use crate::method::HttpMethod;
use crate::request::RequestSpec;
use crate::response::FcrepoResponse;

/// Target, transport and accumulated state shared by the builders that carry headers.
pub(crate) struct RequestBuilder<'a> {
    transport: &'a dyn Transport,
    spec: RequestSpec,
}

impl<'a> RequestBuilder<'a> {
    pub(crate) fn new(method: HttpMethod, uri: Url, transport: &'a dyn Transport) -> Self {
        RequestBuilder {
            transport,
            spec: RequestSpec::new(method, uri),
        }
    }

    pub(crate) fn spec(&self) -> &RequestSpec {
        &self.spec
    }

    pub(crate) fn spec_mut(&mut self) -> &mut RequestSpec {
        &mut self.spec
    }

    pub(crate) fn into_request(self) -> Result<Request> {
        self.spec.into_request()
    }

    pub(crate) async fn perform(self) -> Result<FcrepoResponse> {
        let uri = self.spec.target_uri().clone();
        let request = self.spec.into_request()?;
        self.transport.execute_request(&uri, request).await
    }
}

/// `attachment; filename="<name>"` with the name form-urlencoded.
pub(crate) fn content_disposition(filename: &str) -> String {
    let encoded: String = form_urlencoded::byte_serialize(filename.as_bytes()).collect();
    format!("attachment; filename=\"{encoded}\"")
}
