//! HTTP front end for the seatread scene-description engine.
//!
//! Each table gets its own [`HandAdvisor`](seatread_engine::session::HandAdvisor)
//! behind its own lock in a [`TableRegistry`]. Routes are built by
//! [`WebServer::routes`].

pub mod advice;
pub mod errors;
pub mod handlers;
pub mod logging;
pub mod server;
pub mod tables;

pub use advice::{create_advice_source, AdviceSource, DisabledAdvice};
pub use errors::{handle_rejection, ErrorResponse, ErrorSeverity, IntoErrorResponse};
pub use logging::{init_logging, init_test_logging, LogEntry, LogFormat, TestLogSubscriber};
pub use server::{AppContext, ServerConfig, ServerError, ServerHandle, WebServer};
pub use tables::{TableError, TableId, TableRegistry, TableStatus, DEFAULT_TABLE_TTL};
