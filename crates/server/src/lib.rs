//! Local HTTP adapter for the Hello World skill
//!
//! Accepts request envelopes on `POST /` and answers with the skill's
//! response envelope, so the skill can be exercised without the voice
//! platform.

use std::{future::Future, net::SocketAddr, sync::Arc};

use axum::Router;
use skill::Skill;
use tokio::net::TcpListener;

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;

use config::ServerConfig;
use error::ServerError;

/// A bound, not yet serving, local server
pub struct LocalServer {
    listener: TcpListener,
    router: Router,
}

/// Bind the listener described by `config` and wire the skill routes.
pub async fn start(config: &ServerConfig, skill: Arc<Skill>) -> Result<LocalServer, ServerError> {
    let addr = config.socket_addr();
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;

    Ok(LocalServer {
        listener,
        router: routes::router(skill),
    })
}

impl LocalServer {
    /// Address actually bound; differs from the config when port 0 was asked for
    pub fn local_addr(&self) -> Result<SocketAddr, ServerError> {
        Ok(self.listener.local_addr()?)
    }

    /// Serve until `signal` resolves, then finish in-flight requests.
    pub async fn serve_with_shutdown<F>(self, signal: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(signal)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::net::{IpAddr, Ipv4Addr};

    use super::*;

    #[tokio::test]
    async fn test_start_binds_requested_interface() {
        let config = ServerConfig {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 0,
        };

        let server = start(&config, Arc::new(skill::hello_world_skill()))
            .await
            .unwrap();
        let addr = server.local_addr().unwrap();

        assert!(addr.ip().is_loopback());
        assert_ne!(addr.port(), 0);
    }

    #[tokio::test]
    async fn test_bind_conflict_is_reported() {
        let taken = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let config = ServerConfig {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: taken.local_addr().unwrap().port(),
        };

        let result = start(&config, Arc::new(skill::hello_world_skill())).await;
        assert!(matches!(result, Err(ServerError::Bind { .. })));
    }
}
