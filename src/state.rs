use crate::config::Config;
use crate::storage::Store;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub config: Arc<Config>,
    /// Held across every read-modify-write of a domain file.
    pub write_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            store: Store::new(config.data_dir.clone()),
            config: Arc::new(config),
            write_lock: Arc::new(Mutex::new(())),
        }
    }
}
