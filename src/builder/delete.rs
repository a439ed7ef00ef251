use reqwest::Request;
use tracing::debug;
use url::Url;

use crate::client::Transport;
use crate::error::Result;
use crate::method::HttpMethod;
use crate::response::FcrepoResponse;

/// Builds a request to delete a resource.
pub struct DeleteBuilder<'a> {
    target_uri: Url,
    transport: &'a dyn Transport,
}

impl<'a> DeleteBuilder<'a> {
    pub fn new(uri: Url, transport: &'a dyn Transport) -> Self {
        DeleteBuilder {
            target_uri: uri,
            transport,
        }
    }

    pub fn target_uri(&self) -> &Url {
        &self.target_uri
    }

    pub fn into_request(self) -> Result<Request> {
        Ok(HttpMethod::Delete.create_request(&self.target_uri))
    }

    pub async fn perform(self) -> Result<FcrepoResponse> {
        let request = HttpMethod::Delete.create_request(&self.target_uri);
        debug!(uri = %self.target_uri, "Fcrepo DELETE request");
        self.transport
            .execute_request(&self.target_uri, request)
            .await
    }
}
