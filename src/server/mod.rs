mod app;
mod state;

pub use app::{bind, create_app, serve};
pub use state::AppState;
