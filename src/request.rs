//! Accumulated state of one outgoing request, and how it becomes a transport request.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Body, Request};
use tracing::debug;
use url::Url;

use crate::error::{FcrepoError, Result};
use crate::headers::{
    CONTENT_TYPE, DEFAULT_CONTENT_TYPE, DIGEST, DIGEST_SHA1, IF_MATCH, IF_UNMODIFIED_SINCE,
};
use crate::method::HttpMethod;

/// An entity body together with its media type.
#[derive(Debug)]
pub struct RequestBody {
    body: Body,
    content_type: String,
}

impl RequestBody {
    /// A `None` content type falls back to `application/octet-stream`.
    pub fn new(body: impl Into<Body>, content_type: Option<&str>) -> Self {
        RequestBody {
            body: body.into(),
            content_type: content_type.unwrap_or(DEFAULT_CONTENT_TYPE).to_string(),
        }
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }
}

#[derive(Debug)]
pub struct RequestSpec {
    target_uri: Url,
    method: HttpMethod,
    body: Option<RequestBody>,
    digest: Option<String>,
    etag: Option<String>,
    unmodified_since: Option<String>,
    // verb specific headers, at most one entry per name
    extra_headers: Vec<(&'static str, String)>,
}

impl RequestSpec {
    pub fn new(method: HttpMethod, target_uri: Url) -> Self {
        RequestSpec {
            target_uri,
            method,
            body: None,
            digest: None,
            etag: None,
            unmodified_since: None,
            extra_headers: Vec::new(),
        }
    }

    pub fn target_uri(&self) -> &Url {
        &self.target_uri
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn body(&self) -> Option<&RequestBody> {
        self.body.as_ref()
    }

    pub fn digest(&self) -> Option<&str> {
        self.digest.as_deref()
    }

    pub fn etag(&self) -> Option<&str> {
        self.etag.as_deref()
    }

    pub fn unmodified_since(&self) -> Option<&str> {
        self.unmodified_since.as_deref()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.extra_headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub(crate) fn set_body(&mut self, body: RequestBody) {
        self.body = Some(body);
    }

    pub(crate) fn set_digest(&mut self, digest: String) {
        self.digest = Some(digest);
    }

    pub(crate) fn set_etag(&mut self, etag: String) {
        self.etag = Some(etag);
    }

    pub(crate) fn set_unmodified_since(&mut self, date: String) {
        self.unmodified_since = Some(date);
    }

    /// Replaces any earlier value for the same header.
    pub(crate) fn set_header(&mut self, name: &'static str, value: String) {
        self.extra_headers.retain(|(n, _)| !n.eq_ignore_ascii_case(name));
        self.extra_headers.push((name, value));
    }

    /// Materialise the transport request: method and URI, then headers, then body.
    pub fn into_request(self) -> Result<Request> {
        let headers = populate_headers(&self)?;
        let mut request = self.method.create_request(&self.target_uri);
        *request.headers_mut() = headers;

        if self.method.encloses_entity() {
            if let Some(body) = self.body {
                *request.body_mut() = Some(body.body);
            }
        }

        debug!(
            method = %self.method,
            uri = %self.target_uri,
            headers = ?request.headers(),
            "Fcrepo request prepared"
        );
        Ok(request)
    }
}

/// Headers for `spec`: body type, preconditions, digest, then the verb's own headers.
///
/// Every step is skipped when its field is unset. Verbs that cannot enclose an
/// entity never get a Content-Type even if a body was recorded.
pub fn populate_headers(spec: &RequestSpec) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    let uri = &spec.target_uri;

    if let Some(body) = spec.body.as_ref().filter(|_| spec.method.encloses_entity()) {
        insert(&mut headers, uri, CONTENT_TYPE, &body.content_type)?;
    }
    if let Some(date) = &spec.unmodified_since {
        insert(&mut headers, uri, IF_UNMODIFIED_SINCE, date)?;
    }
    if let Some(etag) = &spec.etag {
        insert(&mut headers, uri, IF_MATCH, etag)?;
    }
    if let Some(digest) = &spec.digest {
        insert(&mut headers, uri, DIGEST, &format!("{DIGEST_SHA1}={digest}"))?;
    }
    for (name, value) in &spec.extra_headers {
        insert(&mut headers, uri, name, value)?;
    }

    Ok(headers)
}

fn insert(headers: &mut HeaderMap, uri: &Url, name: &str, value: &str) -> Result<()> {
    let header_name = HeaderName::from_bytes(name.as_bytes())
        .map_err(|e| FcrepoError::encoding(uri, format!("invalid header name {name}: {e}")))?;
    let header_value = HeaderValue::from_str(value)
        .map_err(|e| FcrepoError::encoding(uri, format!("invalid value for {name}: {e}")))?;
    headers.insert(header_name, header_value);
    Ok(())
}
