//! Navigate command implementation.

use anyhow::{Context as _, Result};
use clap::Args;
use serde_json::json;

use tollgate_core::{RecordingNavigator, RoutePath};

use crate::context::Context;
use crate::output;

#[derive(Args, Debug)]
pub struct NavigateArgs {
    /// Target route, e.g. /dashboard
    pub path: String,

    /// Route the navigation starts from
    #[arg(long)]
    pub from: Option<String>,

    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(ctx: &Context, args: NavigateArgs) -> Result<()> {
    let target = RoutePath::new(&args.path).context("Invalid route path")?;
    let from = args
        .from
        .as_deref()
        .map(RoutePath::new)
        .transpose()
        .context("Invalid --from route path")?;

    let mut navigator = RecordingNavigator::new();
    let allowed = ctx
        .guard
        .can_activate(&ctx.session, &target, from.as_ref(), &mut navigator);
    let class = ctx.guard.table().classify(&target);

    if args.json {
        return output::json(&json!({
            "target": target.as_str(),
            "class": class.to_string(),
            "allowed": allowed,
            "redirect": navigator.last().map(RoutePath::as_str),
        }));
    }

    match navigator.last() {
        Some(to) if !allowed => output::redirect(to.as_str()),
        _ => output::success(&format!("Allowed {}", target)),
    }
    output::field("Class", &class.to_string());

    Ok(())
}
