//! Pipeline configuration records produced by the parser.

use serde::Serialize;

/// Buffer limits for one stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct BufferConfig {
    pub size: u64,
    pub events_count: u64,
}

/// One processing stage (`transform` or `output`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct StageConfig {
    pub workers: u32,
    pub buffer: BufferConfig,
}

/// A complete pipeline entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct PipelineConfig {
    pub name: String,
    /// Value of the `pipeline_type` key.
    #[serde(rename = "type")]
    pub kind: String,
    pub transform: StageConfig,
    pub output: StageConfig,
}

/// Selects which stage of a [`PipelineConfig`] a stage parser writes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageField {
    Transform,
    Output,
}

impl StageField {
    /// Key that introduces this stage in the document.
    pub fn key(self) -> &'static str {
        match self {
            StageField::Transform => "transform",
            StageField::Output => "output",
        }
    }
}

impl PipelineConfig {
    pub fn stage(&self, field: StageField) -> &StageConfig {
        match field {
            StageField::Transform => &self.transform,
            StageField::Output => &self.output,
        }
    }

    pub fn stage_mut(&mut self, field: StageField) -> &mut StageConfig {
        match field {
            StageField::Transform => &mut self.transform,
            StageField::Output => &mut self.output,
        }
    }
}
