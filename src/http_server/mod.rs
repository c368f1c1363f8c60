//! # HTTP Server Module
//!
//! axum front end for the user store.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/list-users[/:count]`, `/usuarios` - List records
//! - `/cadastrar-usuario` - Create (POST)
//! - `/atualizar-usuario/:id` - Update (PUT)
//! - `/remover-usuario/:id` - Delete (DELETE)
//! - `/observability/*` - Health and store counters
//! - anything else - static browser client

pub mod config;
pub mod errors;
pub mod observability_routes;
pub mod server;
pub mod user_routes;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult};
pub use server::HttpServer;
