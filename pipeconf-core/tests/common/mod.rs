//! Test infrastructure for the pipeline parser
//!
//! Event-stream builders and fixture loading shared by the integration tests.

mod builder;
mod loader;

#[allow(unused_imports)]
pub use builder::{ev, expected_count, DocBuilder, PipelineSpec, StageSpec};
#[allow(unused_imports)]
pub use loader::{load_fixtures_by_name, FixtureCase};
