//! Integration test harness for Cartwheel.
//!
//! Boots the real router over in-memory stores on an ephemeral port, so the
//! tests exercise the full HTTP stack (serialization, extractors, status
//! codes) without needing `PostgreSQL`.
//!
//! ```bash
//! cargo test -p cartwheel-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::net::{IpAddr, Ipv4Addr};

use secrecy::SecretString;

use cartwheel_client::ApiSession;
use cartwheel_server::config::ServerConfig;
use cartwheel_server::{AppState, app};

/// A running in-process API server.
pub struct TestServer {
    pub base_url: String,
}

impl TestServer {
    /// Bind an ephemeral port and serve the app in a background task. The
    /// task is aborted when the runtime shuts down at test exit.
    pub async fn spawn() -> Self {
        let state = AppState::in_memory(test_config());
        let router = app(state);

        let listener = tokio::net::TcpListener::bind((IpAddr::V4(Ipv4Addr::LOCALHOST), 0))
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local addr");

        tokio::spawn(async move {
            axum::serve(listener, router)
                .await
                .expect("Test server crashed");
        });

        Self {
            base_url: format!("http://{addr}"),
        }
    }

    /// Anonymous session against this server.
    pub fn session(&self) -> ApiSession {
        ApiSession::new(&self.base_url).expect("Failed to build session")
    }

    /// Session holding a fresh registered account's token.
    pub async fn logged_in_session(&self, email: &str) -> ApiSession {
        let mut session = self.session();
        session
            .register("Test User", email, "hunter22")
            .await
            .expect("Failed to register test account");
        session
    }
}

fn test_config() -> ServerConfig {
    ServerConfig {
        database_url: SecretString::from("postgres://unused"),
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 0,
        jwt_secret: SecretString::from("kJ8mN2pQ7rT4vW9xA3bC6dE1fG5hL0sZ"),
        token_ttl_secs: 3600,
        sentry_dsn: None,
    }
}
