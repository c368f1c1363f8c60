//! # HTTP Server
//!
//! Combines user, health and observability routers, the static client
//! and CORS into one axum app over a shared [`UserStore`].

use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::observability::Logger;
use crate::store::UserStore;

use super::config::HttpServerConfig;
use super::observability_routes::{health_routes, observability_routes};
use super::user_routes::{user_routes, UsersState};

/// HTTP server for the user API
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    pub fn new(config: HttpServerConfig, store: Arc<UserStore>) -> Self {
        let router = Self::build_router(&config, store);
        Self { config, router }
    }

    /// Build the combined router with all endpoints
    fn build_router(config: &HttpServerConfig, store: Arc<UserStore>) -> Router {
        let users_state = Arc::new(UsersState::new(store));

        let cors = if config.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        Router::new()
            .merge(health_routes())
            .merge(user_routes(users_state.clone()))
            .nest("/observability", observability_routes(users_state))
            // index.html at `/`, the rest of the browser client below it
            .fallback_service(ServeDir::new(&config.static_dir))
            .layer(cors)
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Start the HTTP server
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr = self.config.socket_addr();
        let listener = TcpListener::bind(&addr).await?;

        let local = listener.local_addr()?.to_string();
        Logger::info(
            "SERVER_STARTED",
            &[
                ("addr", &local),
                ("static_dir", &self.config.static_dir.display().to_string()),
            ],
        );

        axum::serve(listener, self.router).await
    }
}
