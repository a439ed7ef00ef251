use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use url::Url;

use crate::builder::BodyRequestBuilder;
use crate::config::ClientConfig;
use crate::error::{parse_uri, FcrepoError};
use crate::headers::SPARQL_UPDATE;
use crate::load_config::{credentials_from_env, load_config};
use crate::response::FcrepoResponse;

/// CLI for fcrepo-client: issue single requests against a repository.
#[derive(Parser)]
#[clap(
    name = "fcrepo",
    version,
    about = "Create, read, update and delete resources in a Fedora repository"
)]
pub struct Cli {
    /// Path to the YAML client config file
    #[clap(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print the response as JSON instead of plain text
    #[clap(long, global = true)]
    pub json: bool,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Retrieve a resource
    Get {
        uri: String,
        #[clap(long)]
        accept: Option<String>,
        /// Omit containment and membership triples
        #[clap(long)]
        prefer_minimal: bool,
    },
    /// Retrieve only the headers of a resource
    Head { uri: String },
    /// List the methods a resource supports
    Options { uri: String },
    /// Delete a resource
    Delete { uri: String },
    /// Create a child resource in a container
    Post {
        uri: String,
        /// File to send as the body
        #[clap(long)]
        file: Option<PathBuf>,
        #[clap(long)]
        content_type: Option<String>,
        #[clap(long)]
        slug: Option<String>,
        /// Filename sent in the Content-Disposition header
        #[clap(long)]
        filename: Option<String>,
        /// SHA-1 checksum of the body
        #[clap(long)]
        digest: Option<String>,
    },
    /// Create or replace the resource at a URI
    Put {
        uri: String,
        #[clap(long)]
        file: Option<PathBuf>,
        #[clap(long)]
        content_type: Option<String>,
        #[clap(long)]
        digest: Option<String>,
        #[clap(long)]
        if_match: Option<String>,
        #[clap(long)]
        if_unmodified_since: Option<String>,
        #[clap(long)]
        prefer_lenient: bool,
    },
    /// Apply a SPARQL update to a resource
    Patch {
        uri: String,
        /// File holding the SPARQL update
        #[clap(long)]
        file: PathBuf,
        #[clap(long)]
        if_match: Option<String>,
    },
}

/// Async CLI entrypoint shared by main() and the integration tests.
pub async fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ClientConfig {
            credentials: credentials_from_env()?,
            ..Default::default()
        },
    };
    let client = config
        .build_client()
        .context("Failed to construct repository client")?;
    let base = config.base_url.as_deref();

    let response = match cli.command {
        Commands::Get {
            uri,
            accept,
            prefer_minimal,
        } => {
            let mut builder = client.get(resolve(base, &uri)?).accept(accept.as_deref());
            if prefer_minimal {
                builder = builder.prefer_minimal();
            }
            builder.perform().await?
        }
        Commands::Head { uri } => client.head(resolve(base, &uri)?).perform().await?,
        Commands::Options { uri } => client.options(resolve(base, &uri)?).perform().await?,
        Commands::Delete { uri } => client.delete(resolve(base, &uri)?).perform().await?,
        Commands::Post {
            uri,
            file,
            content_type,
            slug,
            filename,
            digest,
        } => {
            let mut builder = client
                .post(resolve(base, &uri)?)
                .slug(slug.as_deref())
                .filename(filename.as_deref())
                .digest(digest.as_deref());
            if let Some(file) = file {
                builder = builder
                    .body_file(&file, content_type.as_deref())
                    .with_context(|| format!("Failed to open body file {}", file.display()))?;
            }
            builder.perform().await?
        }
        Commands::Put {
            uri,
            file,
            content_type,
            digest,
            if_match,
            if_unmodified_since,
            prefer_lenient,
        } => {
            let mut builder = client
                .put(resolve(base, &uri)?)
                .digest(digest.as_deref())
                .if_match(if_match.as_deref())
                .if_unmodified_since(if_unmodified_since.as_deref());
            if prefer_lenient {
                builder = builder.prefer_lenient();
            }
            if let Some(file) = file {
                builder = builder
                    .body_file(&file, content_type.as_deref())
                    .with_context(|| format!("Failed to open body file {}", file.display()))?;
            }
            builder.perform().await?
        }
        Commands::Patch {
            uri,
            file,
            if_match,
        } => client
            .patch(resolve(base, &uri)?)
            .if_match(if_match.as_deref())
            .body_file(&file, SPARQL_UPDATE)
            .with_context(|| format!("Failed to open update file {}", file.display()))?
            .perform()
            .await?,
    };

    print_response(&response, cli.json)
}

/// Absolute URIs are used as given; anything else is joined onto the configured base URL.
pub fn resolve(base: Option<&str>, uri: &str) -> Result<Url> {
    match parse_uri(uri) {
        Ok(url) => return Ok(url),
        Err(FcrepoError::InvalidUri {
            source: url::ParseError::RelativeUrlWithoutBase,
            ..
        }) => {}
        Err(e) => return Err(e.into()),
    }
    let base = base.with_context(|| {
        format!("{uri:?} is not an absolute URI and no base_url is configured")
    })?;
    let base = Url::parse(base).with_context(|| format!("Invalid base_url {base:?}"))?;
    base.join(uri)
        .with_context(|| format!("Cannot resolve {uri:?} against {base}"))
}

fn print_response(response: &FcrepoResponse, json: bool) -> Result<()> {
    if json {
        let headers: serde_json::Map<String, serde_json::Value> = response
            .headers()
            .keys()
            .map(|name| {
                let values = response.header_values(name.as_str());
                (name.to_string(), serde_json::json!(values))
            })
            .collect();
        let report = serde_json::json!({
            "url": response.url().as_str(),
            "status": response.status_code(),
            "headers": headers,
            "body": response.body_text(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{} {}", response.status_code(), response.url());
    for (name, value) in response.headers() {
        println!("{}: {}", name, value.to_str().unwrap_or("<binary>"));
    }
    if !response.body().is_empty() {
        println!();
        println!("{}", response.body_text());
    }
    Ok(())
}
