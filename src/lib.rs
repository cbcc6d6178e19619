pub mod app;
pub mod config;
pub mod editor;
pub mod errors;
pub mod gate;
pub mod handlers;
pub mod models;
pub mod portal;
pub mod stats;
pub mod state;
pub mod store;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use gate::Gate;
pub use state::AppState;
pub use store::StoreClient;
