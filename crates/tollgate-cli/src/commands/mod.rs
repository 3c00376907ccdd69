//! Subcommand implementations.

pub mod fetch;
pub mod login;
mod logout;
pub mod navigate;
pub mod register;
pub mod routes;
pub mod status;
mod whoami;

use anyhow::Result;

use crate::cli::{Cli, Commands};
use crate::context::Context;

pub async fn handle(cli: Cli) -> Result<()> {
    let ctx = Context::from_cli(&cli)?;

    match cli.command {
        Commands::Register(args) => register::run(&ctx, args).await,
        Commands::Login(args) => login::run(&ctx, args).await,
        Commands::Logout => logout::run(&ctx),
        Commands::Whoami => whoami::run(&ctx),
        Commands::Status(args) => status::run(&ctx, args),
        Commands::Navigate(args) => navigate::run(&ctx, args),
        Commands::Fetch(args) => fetch::run(&ctx, args).await,
        Commands::Routes(args) => routes::run(&ctx, args),
    }
}
