use crate::error::AppError;
use scoring_engine::session::Session;
use std::sync::{Arc, Mutex, MutexGuard};
use types::catalog::MetricCatalog;

#[derive(Clone)]
pub struct AppState {
    /// Single calculator session shared by every request
    pub session: Arc<Mutex<Session>>,
    pub catalog: Arc<MetricCatalog>,
}

impl AppState {
    pub fn new(session: Session) -> Self {
        let catalog = Arc::new(session.catalog().clone());
        Self {
            session: Arc::new(Mutex::new(session)),
            catalog,
        }
    }

    /// Lock the session. Never hold the guard across an await.
    pub fn session(&self) -> Result<MutexGuard<'_, Session>, AppError> {
        self.session
            .lock()
            .map_err(|_| AppError::InternalError(anyhow::anyhow!("Session lock poisoned")))
    }
}
