use reqwest::Request;
use tracing::debug;
use url::Url;

use crate::client::Transport;
use crate::error::Result;
use crate::method::HttpMethod;
use crate::response::FcrepoResponse;

/// Builds a HEAD request to retrieve resource headers.
pub struct HeadBuilder<'a> {
    target_uri: Url,
    transport: &'a dyn Transport,
}

impl<'a> HeadBuilder<'a> {
    pub fn new(uri: Url, transport: &'a dyn Transport) -> Self {
        HeadBuilder {
            target_uri: uri,
            transport,
        }
    }

    pub fn target_uri(&self) -> &Url {
        &self.target_uri
    }

    pub fn into_request(self) -> Result<Request> {
        Ok(HttpMethod::Head.create_request(&self.target_uri))
    }

    pub async fn perform(self) -> Result<FcrepoResponse> {
        let request = HttpMethod::Head.create_request(&self.target_uri);
        debug!(uri = %self.target_uri, "Fcrepo HEAD request");
        self.transport
            .execute_request(&self.target_uri, request)
            .await
    }
}
