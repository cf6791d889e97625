pub mod context;
pub mod enrich;
pub mod precedence;
pub mod projection;
pub mod restore;
pub mod spec;

pub use context::{CollectionSummary, ReconcileContext, ReconcileSummary, ReconciledCollection};
pub use precedence::SourceDecision;
pub use projection::{project_collection, KeyMap};
pub use restore::{
    Pacer, RestorationSession, RestoreConfig, SessionState, ThreadPacer, UiSurface,
};
pub use spec::{spec_for, CollectionSpec, ProjectionScheme};
