//! Wiring shared by every command: session store, guard, pipeline, directory.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context as _, Result};
use directories::ProjectDirs;
use tracing::debug;

use tollgate_core::{
    ApiUrl, LoginFlow, Origin, Pipeline, RouteGuard, SessionService, UserDirectory,
};
use tollgate_file::{FileSessionStore, FileUserDirectory};
use tollgate_http::{ApiClient, HttpUserDirectory, ReqwestTransport};

use crate::cli::Cli;
use crate::config::Config;

/// Everything a command needs, built once from the global flags.
pub struct Context {
    pub origin: Origin,
    pub api: ApiUrl,
    pub store_dir: PathBuf,
    pub session: SessionService,
    pub guard: RouteGuard,
    pub pipeline: Pipeline,
}

impl Context {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let origin = Origin::new(&cli.origin).context("Invalid origin")?;
        let api = ApiUrl::new(&cli.api).context("Invalid API URL")?;
        let config = Config::load(cli.config.as_deref())?;

        let store = FileSessionStore::new(data_dir()?, origin.clone());
        let store_dir = store.dir().to_path_buf();
        let session = SessionService::new(Arc::new(store));

        let transport = ReqwestTransport::new().context("Failed to build HTTP client")?;
        let pipeline = Pipeline::builder(Arc::new(transport))
            .with_session_auth(session.clone())
            .build();

        debug!(%origin, %api, store = %store_dir.display(), "Context ready");

        Ok(Self {
            origin,
            api,
            store_dir,
            session,
            guard: config.guard(),
            pipeline,
        })
    }

    /// The user directory selected by the API URL.
    pub fn directory(&self) -> Result<Arc<dyn UserDirectory>> {
        if self.api.is_local() {
            let path = self
                .api
                .to_file_path()
                .context("Failed to convert file:// URL to path")?;
            Ok(Arc::new(FileUserDirectory::new(path)))
        } else {
            Ok(Arc::new(HttpUserDirectory::new(self.client())))
        }
    }

    /// A login flow writing to this context's session.
    pub fn login_flow(&self) -> Result<LoginFlow> {
        Ok(LoginFlow::new(self.directory()?, self.session.clone()))
    }

    /// An API client for the configured backend.
    pub fn client(&self) -> ApiClient {
        ApiClient::new(self.api.clone(), self.pipeline.clone())
    }
}

/// Root directory for persisted session state.
fn data_dir() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("", "", "tollgate").context("Could not determine data directory")?;

    let data_dir = dirs.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data directory")?;

    Ok(data_dir.to_path_buf())
}
