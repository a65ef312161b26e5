//! # Gatundu North Risk Dashboard Server
//!
//! JSON API over the ward catalogue, the crop-stress estimator and the synthesized
//! history, with an interactive `OpenAPI` reference at `/api`.
//!
//! ```rust,ignore
//! agrisk_server::Server::builder().port(4583).build()?.run().await?;
//! ```

mod router;

pub use router::init as router;

use agrisk::domain::config::{DashboardConfig, SslConfig};
use agrisk::kernel::server::state::ApiState;
use anyhow::{Context, Result, anyhow, bail};
use axum::Router;
use axum_server::Handle;
use axum_server::tls_rustls::RustlsConfig;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use tokio::signal;
use tracing::{error, info, warn};

/// In-flight requests get this long to finish after a shutdown signal.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(30);

/// Collects the dashboard configuration and turns it into a [`Server`].
#[must_use = "builders do nothing unless you call .build()"]
#[derive(Debug, Default)]
pub struct ServerBuilder {
    cfg: DashboardConfig,
}

impl ServerBuilder {
    pub fn config(mut self, cfg: DashboardConfig) -> Self {
        self.cfg = cfg;
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.cfg.server.port = port;
        self
    }

    /// Overrides `model.path`.
    pub fn model_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.cfg.model.path = Some(path.into());
        self
    }

    /// Initializes every feature slice (the stress model is loaded here, once) and
    /// registers them in the shared [`ApiState`].
    ///
    /// # Errors
    /// Fails when a configured certificate or key is missing, or when a slice rejects
    /// the configuration.
    pub fn build(self) -> Result<Server> {
        if let Some(ssl) = &self.cfg.server.ssl {
            check_tls_files(ssl)?;
        }

        let slices =
            agrisk::init(&self.cfg).map_err(|e| anyhow!("Dashboard bootstrap failed: {e}"))?;
        info!(slices = slices.len(), "Feature slices ready");

        let state = slices
            .into_iter()
            .fold(ApiState::builder().config(self.cfg), |builder, slice| {
                builder.register_slice(slice)
            })
            .build()
            .context("Failed to finalize API state registry")?;

        Ok(Server { state })
    }
}

fn check_tls_files(ssl: &SslConfig) -> Result<()> {
    for (label, path) in [("certificate", &ssl.cert), ("key", &ssl.key)] {
        if !path.exists() {
            bail!("SSL {label} not found at: {}", path.display());
        }
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if ssl.key.metadata()?.permissions().mode() & 0o077 != 0 {
            warn!(key = %ssl.key.display(), "SSL private key is readable by group or others");
        }
    }
    Ok(())
}

/// Initialized dashboard, ready to serve.
#[must_use = "call .run().await to start the server"]
#[derive(Debug)]
pub struct Server {
    state: ApiState,
}

impl Server {
    pub fn builder() -> ServerBuilder {
        ServerBuilder::default()
    }

    #[must_use]
    pub const fn state(&self) -> &ApiState {
        &self.state
    }

    /// Serves HTTP, or HTTPS when `server.ssl` is set, until Ctrl+C or SIGTERM.
    ///
    /// # Errors
    /// Fails when the address cannot be bound or the certificates cannot be loaded.
    pub async fn run(self) -> Result<()> {
        let server = self.state.config.server.clone();
        let address = SocketAddr::new(server.address, server.port);
        let app = router::init(self.state);

        let handle = Handle::<SocketAddr>::new();
        tokio::spawn(drain_on_signal(handle.clone()));

        match &server.ssl {
            Some(ssl) => serve_tls(address, ssl, app, handle).await?,
            None => {
                info!(%address, "Listening on http://{address}");
                axum_server::bind(address)
                    .handle(handle)
                    .serve(app.into_make_service())
                    .await
                    .context("HTTP server failed")?;
            },
        }

        info!("Server stopped");
        Ok(())
    }
}

async fn serve_tls(
    address: SocketAddr,
    ssl: &SslConfig,
    app: Router,
    handle: Handle<SocketAddr>,
) -> Result<()> {
    let tls = RustlsConfig::from_pem_file(&ssl.cert, &ssl.key)
        .await
        .context("Failed to load SSL/TLS certificates")?;

    info!(%address, "Listening on https://{address}");
    axum_server::bind_rustls(address, tls)
        .handle(handle)
        .serve(app.into_make_service())
        .await
        .context("HTTPS server failed")
}

async fn drain_on_signal(handle: Handle<SocketAddr>) {
    match shutdown_signal().await {
        Ok(()) => {
            info!(grace_secs = SHUTDOWN_GRACE.as_secs(), "Shutdown requested, draining connections");
            handle.graceful_shutdown(Some(SHUTDOWN_GRACE));
        },
        Err(e) => error!("Cannot listen for shutdown signals: {e:#}"),
    }
}

/// Resolves on Ctrl+C or SIGTERM.
#[cfg(unix)]
async fn shutdown_signal() -> Result<()> {
    let mut terminate = signal::unix::signal(signal::unix::SignalKind::terminate())
        .context("Failed to install SIGTERM handler")?;
    tokio::select! {
        res = signal::ctrl_c() => res.context("Failed to install Ctrl+C handler"),
        _ = terminate.recv() => Ok(()),
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() -> Result<()> {
    signal::ctrl_c().await.context("Failed to install Ctrl+C handler")
}
