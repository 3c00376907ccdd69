//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::{fetch, login, navigate, register, routes, status};

/// Session, route guard and authenticated requests for a client application.
#[derive(Parser, Debug)]
#[command(name = "tollgate")]
#[command(author, version = env!("TOLLGATE_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Application origin the session is scoped to
    #[arg(
        long,
        global = true,
        env = "TOLLGATE_ORIGIN",
        default_value = "http://localhost:4200"
    )]
    pub origin: String,

    /// Backend API base URL (file:// selects a local user directory)
    #[arg(
        long,
        global = true,
        env = "TOLLGATE_API",
        default_value = "http://localhost:3000"
    )]
    pub api: String,

    /// Route configuration file (JSON)
    #[arg(long, global = true, env = "TOLLGATE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a user in the directory
    Register(register::RegisterArgs),

    /// Check credentials and open a session
    Login(login::LoginArgs),

    /// Close the session
    Logout,

    /// Display the signed-in identity
    Whoami,

    /// Show whether a session is open
    Status(status::StatusArgs),

    /// Ask the route guard about a navigation
    Navigate(navigate::NavigateArgs),

    /// Send a request through the authenticated pipeline
    Fetch(fetch::FetchArgs),

    /// Print the route table in effect
    Routes(routes::RoutesArgs),
}
