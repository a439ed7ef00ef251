//! Completed repository responses.

use std::sync::OnceLock;

use bytes::Bytes;
use regex::Regex;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use url::Url;

use crate::headers::{CONTENT_DISPOSITION, CONTENT_TYPE, LINK, LOCATION};

/// Status, headers and body of a request the repository answered.
#[derive(Debug, Clone)]
pub struct FcrepoResponse {
    url: Url,
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl FcrepoResponse {
    pub fn new(url: Url, status: StatusCode, headers: HeaderMap, body: impl Into<Bytes>) -> Self {
        FcrepoResponse {
            url,
            status,
            headers,
            body: body.into(),
        }
    }

    pub(crate) async fn from_reqwest(response: reqwest::Response) -> reqwest::Result<Self> {
        let url = response.url().clone();
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;
        Ok(FcrepoResponse::new(url, status, headers, body))
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// First value of `name`, if present and printable.
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn header_values(&self, name: &str) -> Vec<&str> {
        self.headers
            .get_all(name)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .collect()
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn into_body(self) -> Bytes {
        self.body
    }

    /// The Location header resolved against the request URL.
    pub fn location(&self) -> Option<Url> {
        self.header_value(LOCATION)
            .and_then(|loc| self.url.join(loc).ok())
    }

    pub fn content_type(&self) -> Option<&str> {
        self.header_value(CONTENT_TYPE)
    }

    /// The `filename` parameter of a Content-Disposition header.
    pub fn content_disposition_filename(&self) -> Option<String> {
        let disposition = self.header_value(CONTENT_DISPOSITION)?;
        disposition
            .split(';')
            .map(str::trim)
            .find_map(|part| part.strip_prefix("filename="))
            .map(|name| name.trim_matches('"').to_string())
    }

    /// Targets of all Link headers with relation `rel`, resolved against the request URL.
    pub fn link_headers(&self, rel: &str) -> Vec<Url> {
        self.header_values(LINK)
            .into_iter()
            .flat_map(parse_links)
            .filter(|(_, link_rel)| link_rel.split_whitespace().any(|r| r == rel))
            .filter_map(|(target, _)| self.url.join(&target).ok())
            .collect()
    }
}

fn link_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"<([^>]*)>((?:\s*;\s*[^;,<]+)*)"#).expect("link pattern is valid")
    })
}

fn rel_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"(?i)\brel\s*=\s*(?:"([^"]*)"|([^\s;"]+))"#).expect("rel pattern is valid")
    })
}

/// Split one Link header value into `(target, rel)` pairs; links without rel are skipped.
fn parse_links(value: &str) -> Vec<(String, String)> {
    link_pattern()
        .captures_iter(value)
        .filter_map(|caps| {
            let target = caps.get(1)?.as_str().to_string();
            let params = caps.get(2).map(|m| m.as_str()).unwrap_or_default();
            let rel = rel_pattern().captures(params)?;
            let rel = rel.get(1).or_else(|| rel.get(2))?.as_str().to_string();
            Some((target, rel))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn response_with(headers: &[(&'static str, &'static str)]) -> FcrepoResponse {
        let mut map = HeaderMap::new();
        for (name, value) in headers {
            map.append(*name, HeaderValue::from_static(*value));
        }
        FcrepoResponse::new(
            Url::parse("http://localhost:8080/rest/obj").unwrap(),
            StatusCode::OK,
            map,
            "body",
        )
    }

    #[test]
    fn location_is_resolved_against_request_url() {
        let resp = response_with(&[("location", "/rest/obj/child")]);
        assert_eq!(
            resp.location().unwrap().as_str(),
            "http://localhost:8080/rest/obj/child"
        );
    }

    #[test]
    fn link_headers_are_filtered_by_rel() {
        let resp = response_with(&[
            (
                "link",
                "<http://www.w3.org/ns/ldp#Resource>;rel=\"type\", <http://localhost:8080/rest/obj/fcr:metadata>; rel=\"describedby\"",
            ),
            ("link", "<http://www.w3.org/ns/ldp#Container>; rel=type"),
        ]);

        let types: Vec<String> = resp.link_headers("type").into_iter().map(String::from).collect();
        assert_eq!(
            types,
            vec![
                "http://www.w3.org/ns/ldp#Resource".to_string(),
                "http://www.w3.org/ns/ldp#Container".to_string(),
            ]
        );
        let described = resp.link_headers("describedby");
        assert_eq!(described.len(), 1);
        assert!(resp.link_headers("acl").is_empty());
    }

    #[test]
    fn content_disposition_filename_is_unquoted() {
        let resp = response_with(&[("content-disposition", "attachment; filename=\"cat.png\"")]);
        assert_eq!(resp.content_disposition_filename().as_deref(), Some("cat.png"));
    }

    #[test]
    fn body_and_status_accessors() {
        let resp = response_with(&[("content-type", "text/turtle")]);
        assert_eq!(resp.status_code(), 200);
        assert_eq!(resp.content_type(), Some("text/turtle"));
        assert_eq!(resp.body_text(), "body");
    }
}
