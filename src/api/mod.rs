//! HTTP API module serving the elevator snapshot.

pub mod handlers;
pub mod routes;

pub use handlers::{load_snapshot, AppState};
pub use routes::create_router;
