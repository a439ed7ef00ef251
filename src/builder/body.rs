use std::path::Path;

use reqwest::Body;

use crate::error::Result;
use crate::request::{RequestBody, RequestSpec};

/// Body, digest and precondition setters shared by the write verbs.
///
/// Implementors only expose their [`RequestSpec`]; every setter returns the
/// concrete builder so chains keep the verb-specific methods available.
pub trait BodyRequestBuilder: Sized {
    #[doc(hidden)]
    fn spec_mut(&mut self) -> &mut RequestSpec;

    /// Attach a body as `application/octet-stream`.
    fn body(self, body: impl Into<Body>) -> Self {
        self.body_with_content_type(body, None)
    }

    /// Attach a body; a `None` content type falls back to `application/octet-stream`.
    /// Replaces any body set earlier.
    fn body_with_content_type<'c>(
        mut self,
        body: impl Into<Body>,
        content_type: impl Into<Option<&'c str>>,
    ) -> Self {
        self.spec_mut()
            .set_body(RequestBody::new(body, content_type.into()));
        self
    }

    /// Stream the file at `path` as the body.
    ///
    /// Fails with [`FcrepoError::Io`](crate::FcrepoError::Io) when the file cannot be opened.
    /// The builder is consumed either way; use [`set_body_file`](Self::set_body_file)
    /// to keep it configured after a failed open.
    fn body_file<'c>(
        mut self,
        path: impl AsRef<Path>,
        content_type: impl Into<Option<&'c str>>,
    ) -> Result<Self> {
        self.set_body_file(path, content_type)?;
        Ok(self)
    }

    /// In-place form of [`body_file`](Self::body_file). On error nothing is changed.
    fn set_body_file<'c>(
        &mut self,
        path: impl AsRef<Path>,
        content_type: impl Into<Option<&'c str>>,
    ) -> Result<()> {
        let file = std::fs::File::open(path.as_ref())?;
        tracing::debug!(path = %path.as_ref().display(), "Opened body file");
        self.spec_mut().set_body(RequestBody::new(
            tokio::fs::File::from_std(file),
            content_type.into(),
        ));
        Ok(())
    }

    /// SHA-1 checksum of the body, sent as `Digest: sha1=<digest>`.
    fn digest<'d>(mut self, digest: impl Into<Option<&'d str>>) -> Self {
        if let Some(digest) = digest.into() {
            self.spec_mut().set_digest(digest.to_string());
        }
        self
    }

    /// Only apply the request if the resource still has this ETag.
    fn if_match<'e>(mut self, etag: impl Into<Option<&'e str>>) -> Self {
        if let Some(etag) = etag.into() {
            self.spec_mut().set_etag(etag.to_string());
        }
        self
    }

    /// Only apply the request if the resource is unchanged since this HTTP-date.
    fn if_unmodified_since<'d>(mut self, date: impl Into<Option<&'d str>>) -> Self {
        if let Some(date) = date.into() {
            self.spec_mut().set_unmodified_since(date.to_string());
        }
        self
    }
}
