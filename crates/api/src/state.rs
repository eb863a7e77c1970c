use std::sync::Arc;

use melody_db::ContentStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ContentStore>,
}

#[derive(Debug, Clone)]
pub struct RequestId(pub String);
