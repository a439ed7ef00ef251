//! Wire names of the headers the repository API understands.

pub const CONTENT_TYPE: &str = "Content-Type";
pub const CONTENT_DISPOSITION: &str = "Content-Disposition";
pub const DIGEST: &str = "Digest";
pub const WANT_DIGEST: &str = "Want-Digest";
pub const SLUG: &str = "Slug";
pub const IF_MATCH: &str = "If-Match";
pub const IF_NONE_MATCH: &str = "If-None-Match";
pub const IF_UNMODIFIED_SINCE: &str = "If-Unmodified-Since";
pub const IF_MODIFIED_SINCE: &str = "If-Modified-Since";
pub const ACCEPT: &str = "Accept";
pub const PREFER: &str = "Prefer";
pub const RANGE: &str = "Range";
pub const LINK: &str = "Link";
pub const LOCATION: &str = "Location";

/// Content type used when a body is attached without one.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Content type of SPARQL update bodies sent with PATCH.
pub const SPARQL_UPDATE: &str = "application/sparql-update";

/// Digest algorithm prefix; the repository only verifies SHA-1 checksums.
pub const DIGEST_SHA1: &str = "sha1";
