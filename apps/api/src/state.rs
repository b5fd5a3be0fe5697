use sqlx::PgPool;

use crate::config::Config;
use crate::labels::geometry::SheetGeometry;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
    /// Label sheet geometry for the mailing-label PDF. Only Avery 3424
    /// ships, but the layout engine is parameterized on it.
    pub sheet: SheetGeometry,
}
