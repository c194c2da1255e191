//! Shared application state for the UI server.

use std::sync::Arc;

use tokio::sync::Mutex;

use quest::io::service::ExecutionClient;
use quest::session::Session;

/// Shared state accessible from all request handlers.
///
/// The session is the single source of truth; handlers mutate it only
/// through its own transition API and render from its snapshots.
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<Mutex<Session>>,
    pub client: Arc<ExecutionClient>,
}

impl AppState {
    pub fn new(session: Session, client: ExecutionClient) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
            client: Arc::new(client),
        }
    }
}
