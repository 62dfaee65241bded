//! Fixture loading from YAML files

use std::path::Path;

use pipeconf_core::{BufferConfig, PipelineConfig, StageConfig};
use serde::Deserialize;

/// A single fixture: a YAML document and what parsing it must produce.
#[derive(Debug, Clone, Deserialize)]
pub struct FixtureCase {
    pub id: String,
    pub desc: String,
    pub yaml: String,
    #[serde(default)]
    pub records: Vec<ExpectedRecord>,
    /// Name of the expected `ParseError` variant, if parsing must fail.
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ExpectedRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub transform: ExpectedStage,
    pub output: ExpectedStage,
}

/// `[workers, size, events]`
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ExpectedStage(pub u32, pub u64, pub u64);

impl From<ExpectedStage> for StageConfig {
    fn from(stage: ExpectedStage) -> Self {
        StageConfig {
            workers: stage.0,
            buffer: BufferConfig {
                size: stage.1,
                events_count: stage.2,
            },
        }
    }
}

impl From<ExpectedRecord> for PipelineConfig {
    fn from(record: ExpectedRecord) -> Self {
        PipelineConfig {
            name: record.name,
            kind: record.kind,
            transform: record.transform.into(),
            output: record.output.into(),
        }
    }
}

fn load_fixtures(path: &Path) -> Vec<FixtureCase> {
    let content = std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Failed to read fixture file {:?}: {}", path, e));
    serde_yaml::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture file {:?}: {}", path, e))
}

/// Load fixtures from the standard fixtures directory
pub fn load_fixtures_by_name(name: &str) -> Vec<FixtureCase> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(format!("{}.yaml", name));
    load_fixtures(&path)
}
