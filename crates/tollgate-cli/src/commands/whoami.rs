//! Whoami command implementation.

use anyhow::{Context as _, Result};

use crate::context::Context;
use crate::output;

pub fn run(ctx: &Context) -> Result<()> {
    let identity = ctx
        .session
        .current()
        .context("No active session. Run 'tollgate login' first.")?;

    if let Some(id) = &identity.id {
        output::field("Id", id.as_str());
    }
    output::field("Username", identity.username.as_str());
    if let Some(name) = &identity.name {
        output::field("Name", name);
    }
    output::field("Origin", ctx.origin.as_str());

    Ok(())
}
