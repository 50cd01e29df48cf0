use crate::config::ServerConfig;
use crate::service::CheckService;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<CheckService>,
    pub config: Arc<ServerConfig>,
}
