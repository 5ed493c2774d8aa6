//! AGS platform server binary.
//!
//! Serves line items, scores and results from an in-memory gradebook.
//! Access tokens and their scopes are given on the command line.

use std::net::IpAddr;

use clap::Parser;
use lti_ags::api::{self, ApiError, Config};
use lti_ags::repository::InMemoryGradebook;
use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
enum BinaryError {
    #[error("Invalid --token value '{0}'")]
    #[diagnostic(
        code(lti_ags::binary::token),
        help("Use --token TOKEN=SCOPE[,SCOPE...]")
    )]
    Token(String),

    #[error("API server error: {0}")]
    #[diagnostic(code(lti_ags::binary::api))]
    Api(#[from] ApiError),
}

#[derive(Parser)]
#[command(name = "ags-platform")]
#[command(author, version, about = "LTI Assignment and Grade Services platform", long_about = None)]
struct Cli {
    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: IpAddr,

    /// Port to listen on
    #[arg(short, long, default_value = "3000")]
    port: u16,

    /// Public base URL of line item ids and pagination links
    #[arg(long, env = "AGS_BASE_URL")]
    base_url: Option<String>,

    /// Path token between context and line item ids
    #[arg(long, env = "AGS_SPLIT_TOKEN")]
    split_token: Option<String>,

    /// Accepted bearer token with its scopes, TOKEN=SCOPE[,SCOPE...]
    #[arg(long = "token", value_name = "TOKEN=SCOPES")]
    tokens: Vec<String>,
}

fn parse_token(entry: &str) -> Result<(String, Vec<String>), BinaryError> {
    let (token, scopes) = entry
        .split_once('=')
        .ok_or_else(|| BinaryError::Token(entry.to_string()))?;
    let scopes: Vec<String> = scopes
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    if token.is_empty() || scopes.is_empty() {
        return Err(BinaryError::Token(entry.to_string()));
    }
    Ok((token.to_string(), scopes))
}

#[tokio::main]
async fn main() -> Result<(), BinaryError> {
    let cli = Cli::parse();

    let mut config = Config::new();
    config.host = cli.host;
    config.port = cli.port;
    if let Some(base_url) = cli.base_url {
        config = config.with_base_url(base_url);
    }
    if let Some(split_token) = cli.split_token {
        config = config.with_split_token(split_token);
    }
    for entry in &cli.tokens {
        let (token, scopes) = parse_token(entry)?;
        config = config.with_token(token, scopes);
    }

    let gradebook = InMemoryGradebook::with_split_token(&config.base_url, &config.split_token);
    api::run(config, gradebook).await?;

    Ok(())
}
