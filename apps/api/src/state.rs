use crate::chat::relay::QueryRelay;
use crate::contact::mailer::Mailer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Resume chat relay; owns the read-only document and the chosen backend.
    pub relay: QueryRelay,
    /// Email relay. `None` when no provider key is configured.
    pub mailer: Option<Mailer>,
}
