//! Logout command implementation.

use anyhow::{Context as _, Result};

use crate::context::Context;
use crate::output;

pub fn run(ctx: &Context) -> Result<()> {
    ctx.session.logout().context("Failed to clear session")?;

    output::success("Logged out");
    output::redirect(ctx.guard.login().as_str());

    Ok(())
}
