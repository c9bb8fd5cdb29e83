//! HTTP front end for the Folio reader pipeline.

pub mod config;
pub mod handlers;
pub mod observability;
pub mod routes;
pub mod server;

pub use config::{LogFormat, ServerConfig};
pub use handlers::AppState;
pub use routes::create_router;
pub use server::HttpServer;
