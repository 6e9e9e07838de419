pub mod app_state;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod view;

pub use app_state::AppState;
pub use router::{create_router, webhook_router};

#[cfg(test)]
mod tests;
