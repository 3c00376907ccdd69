//! Routes command implementation.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde_json::json;

use crate::context::Context;
use crate::output;

#[derive(Args, Debug)]
pub struct RoutesArgs {
    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(ctx: &Context, args: RoutesArgs) -> Result<()> {
    let guard = &ctx.guard;

    if args.json {
        return output::json(&json!({
            "landing_route": guard.landing(),
            "login_route": guard.login(),
            "routes": guard.table(),
        }));
    }

    for rule in guard.table().rules() {
        println!("{:<24} {}", rule.path.to_string(), rule.class.to_string().cyan());
    }
    println!();
    output::field("Landing", guard.landing().as_str());
    output::field("Login", guard.login().as_str());

    Ok(())
}
