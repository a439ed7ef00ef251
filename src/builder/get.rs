use reqwest::Request;
use url::Url;

use super::RequestBuilder;
use crate::client::Transport;
use crate::error::Result;
use crate::headers::{ACCEPT, IF_MODIFIED_SINCE, IF_NONE_MATCH, PREFER, RANGE, WANT_DIGEST};
use crate::method::HttpMethod;
use crate::request::RequestSpec;
use crate::response::FcrepoResponse;

/// Builds a GET request retrieving a resource or a representation of its triples.
pub struct GetBuilder<'a> {
    request: RequestBuilder<'a>,
}

impl<'a> GetBuilder<'a> {
    pub fn new(uri: Url, transport: &'a dyn Transport) -> Self {
        GetBuilder {
            request: RequestBuilder::new(HttpMethod::Get, uri, transport),
        }
    }

    /// Media type to negotiate, e.g. `text/turtle`.
    pub fn accept<'s>(self, media_type: impl Into<Option<&'s str>>) -> Self {
        self.set(ACCEPT, media_type.into().map(str::to_string))
    }

    /// Request a byte range; either bound may be left open. Both open, or a
    /// start past the end, is a no-op.
    pub fn range(self, start: Option<u64>, end: Option<u64>) -> Self {
        let value = match (start, end) {
            (None, None) => None,
            (Some(s), Some(e)) if s > e => {
                tracing::warn!(start = s, end = e, "Ignoring inverted byte range");
                None
            }
            (start, end) => Some(format!(
                "bytes={}-{}",
                start.map(|s| s.to_string()).unwrap_or_default(),
                end.map(|e| e.to_string()).unwrap_or_default()
            )),
        };
        self.set(RANGE, value)
    }

    /// Ask for a representation without contained or referencing triples.
    pub fn prefer_minimal(self) -> Self {
        self.set(PREFER, Some("return=minimal".to_string()))
    }

    /// Ask for a representation including and omitting the given LDP preference URIs.
    pub fn prefer_representation(self, include: &[&str], omit: &[&str]) -> Self {
        let mut value = String::from("return=representation");
        if !include.is_empty() {
            value.push_str(&format!("; include=\"{}\"", include.join(" ")));
        }
        if !omit.is_empty() {
            value.push_str(&format!("; omit=\"{}\"", omit.join(" ")));
        }
        self.set(PREFER, Some(value))
    }

    pub fn if_none_match<'s>(self, etag: impl Into<Option<&'s str>>) -> Self {
        self.set(IF_NONE_MATCH, etag.into().map(str::to_string))
    }

    pub fn if_modified_since<'s>(self, date: impl Into<Option<&'s str>>) -> Self {
        self.set(IF_MODIFIED_SINCE, date.into().map(str::to_string))
    }

    /// Digest algorithms the repository should report, e.g. `sha1` or `sha-256;q=0.5`.
    pub fn want_digest<'s>(self, algorithms: impl Into<Option<&'s str>>) -> Self {
        self.set(WANT_DIGEST, algorithms.into().map(str::to_string))
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

    fn set(mut self, name: &'static str, value: Option<String>) -> Self {
        if let Some(value) = value {
            self.request.spec_mut().set_header(name, value);
        }
        self
    }
}
