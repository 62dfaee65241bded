//! Root automaton: the top-level grammar of a pipeline document.
//!
//! The whole parser state is a plain value. [`transition`] takes it by
//! value together with one event and hands back the next state plus the
//! record that event completed, if any. Nothing is shared or global, so a
//! driver can stop, inspect, or clone the state between any two events.
//!
//! ```text
//! Root        --MappingStart-->  InPipeline (new record)
//! InPipeline  --"pipeline_name"/"pipeline_type"--> InPipelineName/InPipelineType --scalar--> (key)
//! InPipeline  --"transform"/"output"-->            InTransform/InOutput (stage automaton)
//! InTransform --stage complete-->                  InPipeline
//! InPipeline  --MappingEnd-->    Root (record complete)
//! Root        --StreamEnd-->     Done
//! ```

use std::mem;

use tracing::{debug, trace};

use crate::config::{PipelineConfig, StageField};
use crate::error::{Context, Expected, ParseError, Position, Result};
use crate::event::Event;
use crate::keys::{PipelineKey, PIPELINE_KEYS};
use crate::number::NumberPolicy;
use crate::span::Span;
use crate::stage::{StageEnv, StageParser, StageStep};

/// Phase of the root automaton.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Root,
    InPipeline,
    InPipelineName,
    InPipelineType,
    /// Delegating to a stage automaton bound to `transform`.
    InTransform(StageParser),
    /// Delegating to a stage automaton bound to `output`.
    InOutput(StageParser),
    Done,
}

/// Whether the next scalar is a key or a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueMode {
    AwaitDirective,
    ExpectKey,
    ExpectValue,
}

/// Working memory of the parser between two events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserState {
    phase: Phase,
    mode: ValueMode,
    /// In-progress record; reset when a pipeline mapping opens.
    record: PipelineConfig,
    /// Records completed so far.
    completed: usize,
    numbers: NumberPolicy,
}

/// Result of feeding one event to [`transition`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: ParserState,
    /// Set when the event closed a pipeline mapping.
    pub completed: Option<PipelineConfig>,
}

impl Default for ParserState {
    fn default() -> Self {
        Self::new(NumberPolicy::default())
    }
}

impl ParserState {
    pub fn new(numbers: NumberPolicy) -> Self {
        Self {
            phase: Phase::Root,
            mode: ValueMode::AwaitDirective,
            record: PipelineConfig::default(),
            completed: 0,
            numbers,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Key/value sub-mode, taken from the active stage while delegating.
    pub fn mode(&self) -> ValueMode {
        match self.phase {
            Phase::InTransform(stage) | Phase::InOutput(stage) => stage.mode(),
            _ => self.mode,
        }
    }

    pub fn is_done(&self) -> bool {
        self.phase == Phase::Done
    }

    /// Number of records completed so far.
    pub fn completed(&self) -> usize {
        self.completed
    }

    /// The record being filled, while inside a pipeline mapping.
    pub fn in_progress(&self) -> Option<&PipelineConfig> {
        match self.phase {
            Phase::Root | Phase::Done => None,
            _ => Some(&self.record),
        }
    }

    pub fn position(&self) -> Position {
        match self.phase {
            Phase::Root | Phase::Done => Position::TopLevel,
            Phase::InPipelineName if self.mode == ValueMode::ExpectValue => Position::PipelineName,
            Phase::InPipelineType if self.mode == ValueMode::ExpectValue => Position::PipelineType,
            Phase::InPipeline | Phase::InPipelineName | Phase::InPipelineType => Position::Pipeline,
            Phase::InTransform(stage) | Phase::InOutput(stage) => stage.position(),
        }
    }

    /// Diagnostic context for an event at `span` in the current state.
    pub fn context(&self, span: Span) -> Context {
        let pipeline = match self.phase {
            Phase::Root | Phase::Done => 0,
            _ => self.completed + 1,
        };
        Context {
            pipeline,
            position: self.position(),
            span,
        }
    }

    fn unexpected(&self, expected: Expected, event: &Event<'_>) -> ParseError {
        ParseError::UnexpectedEvent {
            expected,
            actual: event.kind(),
            context: self.context(event.span()),
        }
    }

    fn stage_env(&self) -> StageEnv {
        StageEnv {
            pipeline: self.completed + 1,
            numbers: self.numbers,
        }
    }

    fn enter_stage(&mut self, field: StageField) {
        let stage = StageParser::new(field);
        self.phase = match field {
            StageField::Transform => Phase::InTransform(stage),
            StageField::Output => Phase::InOutput(stage),
        };
        self.mode = ValueMode::ExpectKey;
    }

    fn root_event(&mut self, event: &Event<'_>) {
        match event {
            Event::StreamStart { .. } | Event::DocumentStart { .. } | Event::SequenceStart { .. } => {
                self.mode = ValueMode::AwaitDirective;
            }
            Event::MappingStart { .. } => {
                trace!(pipeline = self.completed + 1, "pipeline opened");
                self.record = PipelineConfig::default();
                self.phase = Phase::InPipeline;
                self.mode = ValueMode::ExpectKey;
            }
            Event::StreamEnd { .. } => {
                debug!(pipelines = self.completed, "stream end");
                self.phase = Phase::Done;
            }
            // Permissive at the top level.
            _ => {}
        }
    }

    fn pipeline_event(&mut self, event: &Event<'_>) -> Result<Option<PipelineConfig>> {
        match self.mode {
            ValueMode::AwaitDirective | ValueMode::ExpectKey => match event {
                Event::Scalar { value, .. } => {
                    match PIPELINE_KEYS.get(value.as_ref()) {
                        Some(PipelineKey::Name) => {
                            self.phase = Phase::InPipelineName;
                            self.mode = ValueMode::ExpectValue;
                        }
                        Some(PipelineKey::Type) => {
                            self.phase = Phase::InPipelineType;
                            self.mode = ValueMode::ExpectValue;
                        }
                        Some(PipelineKey::Stage(field)) => self.enter_stage(*field),
                        None => {
                            return Err(ParseError::UnknownKey {
                                key: value.to_string(),
                                context: self.context(event.span()),
                            });
                        }
                    }
                    Ok(None)
                }
                Event::MappingEnd { .. } => {
                    let record = mem::take(&mut self.record);
                    self.completed += 1;
                    self.phase = Phase::Root;
                    self.mode = ValueMode::AwaitDirective;
                    debug!(pipeline = self.completed, name = %record.name, "pipeline complete");
                    Ok(Some(record))
                }
                _ => Err(self.unexpected(Expected::Key, event)),
            },
            ValueMode::ExpectValue => match event {
                Event::Scalar { value, .. } => {
                    match self.phase {
                        Phase::InPipelineName => self.record.name = value.to_string(),
                        Phase::InPipelineType => self.record.kind = value.to_string(),
                        _ => {}
                    }
                    self.mode = ValueMode::ExpectKey;
                    Ok(None)
                }
                _ => Err(self.unexpected(Expected::Value, event)),
            },
        }
    }

    fn stage_event(&mut self, stage: StageParser, event: &Event<'_>) -> Result<()> {
        let env = self.stage_env();
        match stage.step(event, &mut self.record, env)? {
            StageStep::Continue(next) => {
                self.phase = match next.field() {
                    StageField::Transform => Phase::InTransform(next),
                    StageField::Output => Phase::InOutput(next),
                };
            }
            StageStep::Complete => {
                self.phase = Phase::InPipeline;
                self.mode = ValueMode::ExpectKey;
            }
        }
        Ok(())
    }
}

/// Advance the parser by one event.
///
/// On error the state is consumed; an aborted parse cannot be resumed.
pub fn transition(mut state: ParserState, event: &Event<'_>) -> Result<Transition> {
    let completed = match state.phase {
        Phase::Root => {
            state.root_event(event);
            None
        }
        Phase::InPipeline | Phase::InPipelineName | Phase::InPipelineType => {
            state.pipeline_event(event)?
        }
        Phase::InTransform(stage) | Phase::InOutput(stage) => {
            state.stage_event(stage, event)?;
            None
        }
        Phase::Done => None,
    };

    Ok(Transition { state, completed })
}
