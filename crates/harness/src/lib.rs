pub mod builder;
pub mod pacer;
pub mod surface;

pub use builder::ReportBuilder;
pub use pacer::RecordingPacer;
pub use surface::FakeSurface;
