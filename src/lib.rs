pub mod app;
pub mod config;
pub mod dashboard;
pub mod errors;
pub mod habits;
pub mod handlers;
pub mod journal;
pub mod lists;
pub mod mindful;
pub mod models;
pub mod state;
pub mod storage;
pub mod tasks;
pub mod timetracker;

pub use app::router;
pub use config::Config;
pub use state::AppState;
pub use storage::{Domain, Store};
