use reqwest::Request;
use url::Url;

use super::{content_disposition, BodyRequestBuilder, RequestBuilder};
use crate::client::Transport;
use crate::error::Result;
use crate::headers::{CONTENT_DISPOSITION, PREFER};
use crate::method::HttpMethod;
use crate::request::RequestSpec;
use crate::response::FcrepoResponse;

/// Builds a PUT request creating or replacing the resource at the target URI.
pub struct PutBuilder<'a> {
    request: RequestBuilder<'a>,
}

impl<'a> PutBuilder<'a> {
    pub fn new(uri: Url, transport: &'a dyn Transport) -> Self {
        PutBuilder {
            request: RequestBuilder::new(HttpMethod::Put, uri, transport),
        }
    }

    pub fn filename<'s>(mut self, filename: impl Into<Option<&'s str>>) -> Self {
        if let Some(filename) = filename.into() {
            self.request
                .spec_mut()
                .set_header(CONTENT_DISPOSITION, content_disposition(filename));
        }
        self
    }

    /// Ask the repository to ignore server managed triples in an RDF body
    /// instead of rejecting the request.
    pub fn prefer_lenient(mut self) -> Self {
        self.request
            .spec_mut()
            .set_header(PREFER, "handling=lenient; received=\"minimal\"".to_string());
        self
    }

    pub fn spec(&self) -> &RequestSpec {
        self.request.spec()
    }

    pub fn into_request(self) -> Result<Request> {
        self.request.into_request()
    }

    pub async fn perform(self) -> Result<FcrepoResponse> {
        self.request.perform().await
    }
}

impl BodyRequestBuilder for PutBuilder<'_> {
    fn spec_mut(&mut self) -> &mut RequestSpec {
        self.request.spec_mut()
    }
}
