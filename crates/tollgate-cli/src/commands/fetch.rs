//! Fetch command implementation.

use anyhow::{Context as _, Result, bail};
use clap::Args;
use colored::Colorize;
use reqwest::Method;
use url::Url;

use tollgate_core::OutgoingRequest;

use crate::context::Context;

#[derive(Args, Debug)]
pub struct FetchArgs {
    /// Absolute URL, or a resource below --api (e.g. users)
    pub url: String,

    /// HTTP method
    #[arg(short = 'X', long, default_value = "GET")]
    pub method: String,

    /// JSON request body
    #[arg(short, long)]
    pub data: Option<String>,
}

pub async fn run(ctx: &Context, args: FetchArgs) -> Result<()> {
    let url = match Url::parse(&args.url) {
        Ok(url) => url,
        Err(_) if ctx.api.is_network() => ctx.client().url(&args.url)?,
        Err(e) => bail!("Invalid URL '{}': {}", args.url, e),
    };

    let method = Method::from_bytes(args.method.to_uppercase().as_bytes())
        .context("Invalid HTTP method")?;

    let mut request = OutgoingRequest::new(method, url);
    if let Some(data) = &args.data {
        let body: serde_json::Value = serde_json::from_str(data).context("--data must be JSON")?;
        request = request.with_json(&body)?;
    }

    let response = ctx.pipeline.send(request).await.context("Request failed")?;

    eprintln!("{}", format!("HTTP {}", response.status).dimmed());
    let body = response.text();
    if !body.is_empty() {
        println!("{}", body);
    }

    response.error_for_status()?;
    Ok(())
}
