//! HTTP server for Stockroom.
//!
//! Exposes the in-memory inventory over a small JSON API, with one photo
//! per item stored in the blob root. See [`router::build_router`] for the
//! route table.

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;
pub mod state;
pub mod view;

pub use config::{ServerConfig, DEFAULT_MAX_UPLOAD_BYTES};
pub use error::{ApiError, ServerError, ServerResult};
pub use server::StockroomServer;
pub use state::AppState;
pub use view::{ItemView, MessageBody};
