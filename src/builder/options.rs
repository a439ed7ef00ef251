use reqwest::Request;
use tracing::debug;
use url::Url;

use crate::client::Transport;
use crate::error::Result;
use crate::method::HttpMethod;
use crate::response::FcrepoResponse;

/// Builds an OPTIONS request describing the methods a resource supports.
pub struct OptionsBuilder<'a> {
    target_uri: Url,
    transport: &'a dyn Transport,
}

impl<'a> OptionsBuilder<'a> {
    pub fn new(uri: Url, transport: &'a dyn Transport) -> Self {
        OptionsBuilder {
            target_uri: uri,
            transport,
        }
    }

    pub fn into_request(self) -> Result<Request> {
        Ok(HttpMethod::Options.create_request(&self.target_uri))
    }

    pub async fn perform(self) -> Result<FcrepoResponse> {
        let request = HttpMethod::Options.create_request(&self.target_uri);
        debug!(uri = %self.target_uri, "Fcrepo OPTIONS request");
        self.transport
            .execute_request(&self.target_uri, request)
            .await
    }
}
