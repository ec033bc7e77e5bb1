//! Carta Client - HTTP client for the menu backend
//!
//! Tag catalog calls and tag reconciliation against the REST backend.
//! The cart lives in `shared` and never touches the network.

pub mod config;
pub mod error;
pub mod http;
pub mod logger;
pub mod reconcile;
pub mod session;
pub mod tags;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::{HttpClient, NetworkHttpClient};
pub use logger::{init_logger, init_logger_with_level};
pub use reconcile::{
    AssociationError, AssociationFailure, AssociationOp, ReconcileReport, TagDiff, TagReconciler,
};
pub use session::Session;
pub use tags::{TagAssignments, TagClient, assignment_path};

// Re-export shared types for convenience
pub use shared::models::{Tag, TagType};
