//! Process plumbing: logging setup and shutdown signalling.
pub mod logger;
pub mod shutdown;
pub mod shutdown_handlers;
