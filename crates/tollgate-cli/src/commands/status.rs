//! Status command implementation.

use anyhow::Result;
use clap::Args;
use serde_json::json;

use crate::context::Context;
use crate::output;

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(ctx: &Context, args: StatusArgs) -> Result<()> {
    let identity = ctx.session.current();
    let state = ctx.session.state();

    if args.json {
        return output::json(&json!({
            "state": state.to_string(),
            "origin": ctx.origin.as_str(),
            "username": identity.as_ref().map(|i| i.username.as_str()),
        }));
    }

    output::field("State", &state.to_string());
    output::field("Origin", ctx.origin.as_str());
    output::field("Store", &ctx.store_dir.display().to_string());
    if let Some(identity) = identity {
        output::field("Username", identity.username.as_str());
    }

    Ok(())
}
