//! Fluent request builders for the Fedora repository HTTP API.
//!
//! ```no_run
//! use fcrepo_client::{BodyRequestBuilder, FcrepoClient};
//!
//! # async fn example() -> fcrepo_client::Result<()> {
//! let client = FcrepoClient::builder()
//!     .credentials("fedoraAdmin", "secret")
//!     .throw_exception_on_failure()
//!     .build()?;
//!
//! let container = url::Url::parse("http://localhost:8080/rest/").unwrap();
//! let response = client
//!     .post(container)
//!     .body_with_content_type(std::fs::read("cat.png")?, "image/png")
//!     .slug("photo1")
//!     .filename("cat.png")
//!     .perform()
//!     .await?;
//! println!("created {:?}", response.location());
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod headers;
pub mod load_config;
pub mod method;
pub mod request;
pub mod response;

pub use builder::{
    BodyRequestBuilder, DeleteBuilder, GetBuilder, HeadBuilder, OptionsBuilder, PatchBuilder,
    PostBuilder, PutBuilder,
};
#[cfg(any(test, feature = "test-export-mocks"))]
pub use client::MockTransport;
pub use client::{FcrepoClient, FcrepoClientBuilder, Transport};
pub use error::{FcrepoError, Result};
pub use method::HttpMethod;
pub use request::{populate_headers, RequestBody, RequestSpec};
pub use response::FcrepoResponse;
