use reqwest::Request;
use url::Url;

use super::{content_disposition, BodyRequestBuilder, RequestBuilder};
use crate::client::Transport;
use crate::error::Result;
use crate::headers::{CONTENT_DISPOSITION, SLUG};
use crate::method::HttpMethod;
use crate::request::RequestSpec;
use crate::response::FcrepoResponse;

/// Builds a POST request creating a new resource inside an LDP container.
pub struct PostBuilder<'a> {
    request: RequestBuilder<'a>,
}

impl<'a> PostBuilder<'a> {
    /// `uri` is the container the new child is created in.
    pub fn new(uri: Url, transport: &'a dyn Transport) -> Self {
        PostBuilder {
            request: RequestBuilder::new(HttpMethod::Post, uri, transport),
        }
    }

    /// Name of the file carried in the body, sent as a Content-Disposition attachment.
    pub fn filename<'s>(mut self, filename: impl Into<Option<&'s str>>) -> Self {
        if let Some(filename) = filename.into() {
            self.request
                .spec_mut()
                .set_header(CONTENT_DISPOSITION, content_disposition(filename));
        }
        self
    }

    /// Suggested name for the new child; the repository may ignore it.
    pub fn slug<'s>(mut self, slug: impl Into<Option<&'s str>>) -> Self {
        if let Some(slug) = slug.into() {
            self.request.spec_mut().set_header(SLUG, slug.to_string());
        }
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

impl BodyRequestBuilder for PostBuilder<'_> {
    fn spec_mut(&mut self) -> &mut RequestSpec {
        self.request.spec_mut()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use reqwest::StatusCode;

    use super::*;
    use crate::builder::testing::{expect_one, uri};
    use crate::client::MockTransport;
    use crate::error::FcrepoError;

    fn header<'r>(request: &'r Request, name: &str) -> Option<&'r str> {
        request.headers().get(name).and_then(|v| v.to_str().ok())
    }

    #[test]
    fn create_request_uses_post_and_target() {
        let transport = MockTransport::new();
        let request = PostBuilder::new(uri(), &transport).into_request().unwrap();
        assert_eq!(request.method(), reqwest::Method::POST);
        assert_eq!(request.url(), &uri());
        assert!(request.body().is_none());
        assert!(request.headers().is_empty());
    }

    #[test]
    fn body_defaults_to_octet_stream() {
        let transport = MockTransport::new();
        let request = PostBuilder::new(uri(), &transport)
            .body("payload")
            .into_request()
            .unwrap();
        assert_eq!(header(&request, "content-type"), Some("application/octet-stream"));
        assert_eq!(request.body().and_then(|b| b.as_bytes()), Some(&b"payload"[..]));
    }

    #[test]
    fn body_with_explicit_or_missing_content_type() {
        let transport = MockTransport::new();
        let typed = PostBuilder::new(uri(), &transport)
            .body_with_content_type("hi", "text/plain")
            .into_request()
            .unwrap();
        assert_eq!(header(&typed, "content-type"), Some("text/plain"));

        let untyped = PostBuilder::new(uri(), &transport)
            .body_with_content_type("hi", None)
            .into_request()
            .unwrap();
        assert_eq!(header(&untyped, "content-type"), Some("application/octet-stream"));
    }

    #[test]
    fn digest_is_sha1_qualified() {
        let transport = MockTransport::new();
        let request = PostBuilder::new(uri(), &transport)
            .digest("abc123")
            .into_request()
            .unwrap();
        assert_eq!(header(&request, "digest"), Some("sha1=abc123"));
    }

    #[test]
    fn filename_sets_encoded_disposition() {
        let transport = MockTransport::new();
        let request = PostBuilder::new(uri(), &transport)
            .filename("my file.txt")
            .into_request()
            .unwrap();
        assert_eq!(
            header(&request, "content-disposition"),
            Some("attachment; filename=\"my+file.txt\"")
        );
    }

    #[test]
    fn missing_filename_and_slug_add_nothing() {
        let transport = MockTransport::new();
        let request = PostBuilder::new(uri(), &transport)
            .filename(None)
            .slug(None)
            .digest(None)
            .into_request()
            .unwrap();
        assert!(request.headers().get("content-disposition").is_none());
        assert!(request.headers().get("slug").is_none());
        assert!(request.headers().get("digest").is_none());
    }

    #[test]
    fn no_preconditions_unless_set() {
        let transport = MockTransport::new();
        let request = PostBuilder::new(uri(), &transport)
            .body("x")
            .into_request()
            .unwrap();
        assert!(request.headers().get("if-match").is_none());
        assert!(request.headers().get("if-unmodified-since").is_none());
    }

    #[test]
    fn repeated_setters_keep_last_value() {
        let transport = MockTransport::new();
        let request = PostBuilder::new(uri(), &transport)
            .slug("first")
            .slug("second")
            .filename("a.txt")
            .filename("b.txt")
            .digest("111")
            .digest("222")
            .body_with_content_type("one", "text/plain")
            .body_with_content_type("two", "text/csv")
            .into_request()
            .unwrap();

        let headers = request.headers();
        assert_eq!(headers.get_all("slug").iter().count(), 1);
        assert_eq!(header(&request, "slug"), Some("second"));
        assert_eq!(
            header(&request, "content-disposition"),
            Some("attachment; filename=\"b.txt\"")
        );
        assert_eq!(header(&request, "digest"), Some("sha1=222"));
        assert_eq!(header(&request, "content-type"), Some("text/csv"));
        assert_eq!(request.body().and_then(|b| b.as_bytes()), Some(&b"two"[..]));
    }

    #[tokio::test]
    async fn body_file_streams_file_contents() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"file body").unwrap();

        let transport = MockTransport::new();
        let request = PostBuilder::new(uri(), &transport)
            .body_file(file.path(), "text/plain")
            .unwrap()
            .into_request()
            .unwrap();
        assert_eq!(header(&request, "content-type"), Some("text/plain"));
        assert!(request.body().is_some());
    }

    #[test]
    fn body_file_reports_missing_file() {
        let transport = MockTransport::new();
        let dir = tempfile::tempdir().unwrap();
        let result = PostBuilder::new(uri(), &transport)
            .body_file(dir.path().join("absent.bin"), None);
        assert!(matches!(result, Err(FcrepoError::Io(_))));
    }

    #[test]
    fn failed_file_open_keeps_builder_state() {
        let transport = MockTransport::new();
        let dir = tempfile::tempdir().unwrap();
        let mut builder = PostBuilder::new(uri(), &transport)
            .body_with_content_type("kept", "text/plain")
            .slug("photo1")
            .digest("abc123");

        let result = builder.set_body_file(dir.path().join("absent.bin"), "image/png");
        assert!(matches!(result, Err(FcrepoError::Io(_))));

        let request = builder.into_request().unwrap();
        assert_eq!(header(&request, "slug"), Some("photo1"));
        assert_eq!(header(&request, "digest"), Some("sha1=abc123"));
        assert_eq!(header(&request, "content-type"), Some("text/plain"));
        assert_eq!(request.body().and_then(|b| b.as_bytes()), Some(&b"kept"[..]));
    }

    #[tokio::test]
    async fn perform_sends_post_with_all_headers() {
        let transport = expect_one(StatusCode::CREATED, |target, request| {
            target == &uri()
                && request.method() == reqwest::Method::POST
                && request.url() == &uri()
                && header(request, "content-type") == Some("image/png")
                && header(request, "slug") == Some("photo1")
                && header(request, "content-disposition") == Some("attachment; filename=\"cat.png\"")
                && request.body().and_then(|b| b.as_bytes()) == Some(&b"\x89PNG"[..])
        });

        let response = PostBuilder::new(uri(), &transport)
            .body_with_content_type(&b"\x89PNG"[..], "image/png")
            .slug("photo1")
            .filename("cat.png")
            .perform()
            .await
            .unwrap();
        assert_eq!(response.status_code(), 201);
    }

    #[tokio::test]
    async fn perform_fails_before_sending_unencodable_slug() {
        let mut transport = MockTransport::new();
        transport.expect_execute_request().times(0);

        let err = PostBuilder::new(uri(), &transport)
            .slug("line\nbreak")
            .perform()
            .await
            .unwrap_err();
        assert!(matches!(err, FcrepoError::OperationFailed { status_code: -1, .. }));
    }
}
