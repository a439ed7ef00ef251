use reqwest::{Method, Request};
use url::Url;

/// The verbs of the repository API, one per request builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Head,
    Post,
    Put,
    Patch,
    Delete,
    Options,
}

impl HttpMethod {
    pub fn as_method(self) -> Method {
        match self {
            HttpMethod::Get => Method::GET,
            HttpMethod::Head => Method::HEAD,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
            HttpMethod::Options => Method::OPTIONS,
        }
    }

    /// Whether requests of this verb may carry an entity body.
    pub fn encloses_entity(self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch)
    }

    /// Create an empty transport request of this verb aimed at `uri`.
    pub fn create_request(self, uri: &Url) -> Request {
        Request::new(self.as_method(), uri.clone())
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_method().as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [HttpMethod; 7] = [
        HttpMethod::Get,
        HttpMethod::Head,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Patch,
        HttpMethod::Delete,
        HttpMethod::Options,
    ];

    #[test]
    fn create_request_binds_method_and_uri() {
        let uri = Url::parse("http://localhost:8080/rest/container/child").unwrap();
        for m in ALL {
            let req = m.create_request(&uri);
            assert_eq!(req.method(), &m.as_method());
            assert_eq!(req.url(), &uri);
            assert!(req.body().is_none());
            assert!(req.headers().is_empty());
        }
    }

    #[test]
    fn only_write_verbs_enclose_entities() {
        let enclosing: Vec<_> = ALL.into_iter().filter(|m| m.encloses_entity()).collect();
        assert_eq!(enclosing, vec![HttpMethod::Post, HttpMethod::Put, HttpMethod::Patch]);
    }

    #[test]
    fn display_uses_wire_name() {
        assert_eq!(HttpMethod::Delete.to_string(), "DELETE");
        assert_eq!(HttpMethod::Options.to_string(), "OPTIONS");
    }
}
