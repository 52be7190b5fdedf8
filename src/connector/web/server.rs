use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::{info, warn};

use crate::connector::api::Container;

use super::routes::{create_router, AppState};

pub const DEFAULT_PORT: u16 = 8501;
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(60 * 60);

pub struct WebServerConfig {
    pub bind_addr: SocketAddr,
    /// Sessions untouched for this long are dropped by the background sweep.
    pub session_ttl: Duration,
}

impl WebServerConfig {
    /// Loopback unless `public` is set, in which case every interface.
    pub fn new(port: u16, public: bool) -> Self {
        let ip = if public { [0, 0, 0, 0] } else { [127, 0, 0, 1] };
        Self {
            bind_addr: SocketAddr::from((ip, port)),
            session_ttl: DEFAULT_SESSION_TTL,
        }
    }

    pub fn with_session_ttl(mut self, ttl: Duration) -> Self {
        self.session_ttl = ttl;
        self
    }

    /// How often the sweep runs: a tenth of the TTL, between 1 s and 5 min.
    pub fn sweep_interval(&self) -> Duration {
        (self.session_ttl / 10).clamp(Duration::from_secs(1), Duration::from_secs(300))
    }
}

impl Default for WebServerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_PORT, false)
    }
}

pub struct WebServer {
    config: WebServerConfig,
    container: Arc<Container>,
}

impl WebServer {
    pub fn new(config: WebServerConfig, container: Arc<Container>) -> Self {
        Self { config, container }
    }

    pub async fn start(self) -> Result<()> {
        let app = create_router(AppState {
            container: self.container.clone(),
        });

        let listener = tokio::net::TcpListener::bind(&self.config.bind_addr).await?;
        info!(
            "Serving chat page on http://{} (model: {}, session ttl: {:?})",
            listener.local_addr()?,
            self.container.model_name(),
            self.config.session_ttl
        );

        let sessions = self.container.session_use_case();
        let ttl = self.config.session_ttl;
        let mut ticker = tokio::time::interval(self.config.sweep_interval());
        tokio::spawn(async move {
            loop {
                ticker.tick().await;
                if let Err(e) = sessions.expire_idle(ttl).await {
                    warn!("Session sweep failed: {}", e);
                }
            }
        });

        axum::serve(listener, app).await?;
        Ok(())
    }
}
