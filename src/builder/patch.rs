use reqwest::{Body, Request};
use url::Url;

use super::{BodyRequestBuilder, RequestBuilder};
use crate::client::Transport;
use crate::error::Result;
use crate::headers::SPARQL_UPDATE;
use crate::method::HttpMethod;
use crate::request::RequestSpec;
use crate::response::FcrepoResponse;

/// Builds a PATCH request applying a SPARQL update to a resource's triples.
pub struct PatchBuilder<'a> {
    request: RequestBuilder<'a>,
}

impl<'a> PatchBuilder<'a> {
    pub fn new(uri: Url, transport: &'a dyn Transport) -> Self {
        PatchBuilder {
            request: RequestBuilder::new(HttpMethod::Patch, uri, transport),
        }
    }

    /// Attach a SPARQL update as the body, typed `application/sparql-update`.
    pub fn sparql_update(self, update: impl Into<Body>) -> Self {
        self.body_with_content_type(update, SPARQL_UPDATE)
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

impl BodyRequestBuilder for PatchBuilder<'_> {
    fn spec_mut(&mut self) -> &mut RequestSpec {
        self.request.spec_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::testing::uri;
    use crate::client::MockTransport;

    const UPDATE: &str = "INSERT DATA { <> <http://purl.org/dc/elements/1.1/title> \"t\" }";

    #[test]
    fn sparql_update_sets_sparql_type() {
        let transport = MockTransport::new();
        let request = PatchBuilder::new(uri(), &transport)
            .sparql_update(UPDATE)
            .into_request()
            .unwrap();
        assert_eq!(request.method(), reqwest::Method::PATCH);
        assert_eq!(request.headers()["content-type"], SPARQL_UPDATE);
        assert_eq!(
            request.body().and_then(|b| b.as_bytes()),
            Some(UPDATE.as_bytes())
        );
    }

    #[test]
    fn untyped_body_is_octet_stream() {
        let transport = MockTransport::new();
        let request = PatchBuilder::new(uri(), &transport)
            .body(UPDATE)
            .into_request()
            .unwrap();
        assert_eq!(request.headers()["content-type"], "application/octet-stream");

        let request = PatchBuilder::new(uri(), &transport)
            .body_with_content_type(UPDATE, None)
            .into_request()
            .unwrap();
        assert_eq!(request.headers()["content-type"], "application/octet-stream");
    }

    #[test]
    fn explicit_type_wins() {
        let transport = MockTransport::new();
        let request = PatchBuilder::new(uri(), &transport)
            .body_with_content_type(UPDATE, "text/plain")
            .if_match("\"v2\"")
            .into_request()
            .unwrap();
        assert_eq!(request.headers()["content-type"], "text/plain");
        assert_eq!(request.headers()["if-match"], "\"v2\"");
    }
}
