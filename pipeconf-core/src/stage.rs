//! Stage automaton: parses one `transform` or `output` block.
//!
//! ```text
//! transform:            Opening  --MappingStart-->  Root
//!   workers: 4          Root     --"workers"-->     Workers   --scalar--> Root
//!   buffer:             Root     --"buffer"-->      BufferOpening
//!     size: 1024        BufferOpening --MappingStart--> Buffer
//!     events: 10        Buffer   --"size"/"events"--> BufferSize/BufferEvents --scalar--> Buffer
//!                       Buffer   --MappingEnd-->    Root
//!                       Root     --MappingEnd-->    (stage complete)
//! ```
//!
//! The automaton is bound to its target field when created, so the same
//! code serves both stages without looking at the enclosing state.

use tracing::{debug, trace};

use crate::config::{PipelineConfig, StageField};
use crate::error::{Context, Expected, ParseError, Position, Result};
use crate::event::Event;
use crate::keys::{BufferKey, StageKey, BUFFER_KEYS, STAGE_KEYS};
use crate::number::{parse_unsigned, NumberPolicy};
use crate::root::ValueMode;

/// Sub-state of a stage automaton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageState {
    /// Stage key seen; its mapping has not opened yet.
    Opening,
    StageRoot,
    Workers,
    /// `buffer` key seen; its mapping has not opened yet.
    BufferOpening,
    Buffer,
    BufferSize,
    BufferEvents,
}

/// Parser for a single stage block, bound to one [`StageField`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageParser {
    field: StageField,
    state: StageState,
}

/// Outcome of feeding one event to a [`StageParser`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageStep {
    Continue(StageParser),
    /// The stage's own mapping closed.
    Complete,
}

/// Per-event inputs a stage needs from its owner.
#[derive(Debug, Clone, Copy)]
pub(crate) struct StageEnv {
    /// 1-based ordinal of the pipeline being parsed.
    pub pipeline: usize,
    pub numbers: NumberPolicy,
}

impl StageParser {
    pub fn new(field: StageField) -> Self {
        Self {
            field,
            state: StageState::Opening,
        }
    }

    pub fn field(&self) -> StageField {
        self.field
    }

    pub fn state(&self) -> StageState {
        self.state
    }

    /// Key/value sub-mode implied by the current sub-state.
    pub fn mode(&self) -> ValueMode {
        match self.state {
            StageState::Workers | StageState::BufferSize | StageState::BufferEvents => {
                ValueMode::ExpectValue
            }
            _ => ValueMode::ExpectKey,
        }
    }

    pub fn position(&self) -> Position {
        Position::Stage {
            field: self.field,
            state: self.state,
        }
    }

    fn with_state(self, state: StageState) -> StageStep {
        StageStep::Continue(Self { state, ..self })
    }

    fn context(&self, env: StageEnv, event: &Event<'_>) -> Context {
        Context {
            pipeline: env.pipeline,
            position: self.position(),
            span: event.span(),
        }
    }

    fn unexpected(&self, expected: Expected, env: StageEnv, event: &Event<'_>) -> ParseError {
        ParseError::UnexpectedEvent {
            expected,
            actual: event.kind(),
            context: self.context(env, event),
        }
    }

    fn unknown_key(&self, key: &str, env: StageEnv, event: &Event<'_>) -> ParseError {
        ParseError::UnknownKey {
            key: key.to_owned(),
            context: self.context(env, event),
        }
    }

    /// Feed one event. Field writes go into the bound stage of `record`.
    pub(crate) fn step(
        self,
        event: &Event<'_>,
        record: &mut PipelineConfig,
        env: StageEnv,
    ) -> Result<StageStep> {
        use StageState::*;

        match (self.state, event) {
            (Opening, Event::MappingStart { .. }) => Ok(self.with_state(StageRoot)),
            (Opening, _) => Err(self.unexpected(Expected::Mapping, env, event)),

            (StageRoot, Event::Scalar { value, .. }) => match STAGE_KEYS.get(value.as_ref()) {
                Some(StageKey::Workers) => Ok(self.with_state(Workers)),
                Some(StageKey::Buffer) => Ok(self.with_state(BufferOpening)),
                None => Err(self.unknown_key(value, env, event)),
            },
            (StageRoot, Event::MappingEnd { .. }) => {
                trace!(stage = self.field.key(), "stage complete");
                Ok(StageStep::Complete)
            }
            (StageRoot, _) => Err(self.unexpected(Expected::Key, env, event)),

            (BufferOpening, Event::MappingStart { .. }) => Ok(self.with_state(Buffer)),
            (BufferOpening, _) => Err(self.unexpected(Expected::Mapping, env, event)),

            (Buffer, Event::Scalar { value, .. }) => match BUFFER_KEYS.get(value.as_ref()) {
                Some(BufferKey::Size) => Ok(self.with_state(BufferSize)),
                Some(BufferKey::Events) => Ok(self.with_state(BufferEvents)),
                None => Err(self.unknown_key(value, env, event)),
            },
            (Buffer, Event::MappingEnd { .. }) => Ok(self.with_state(StageRoot)),
            (Buffer, _) => Err(self.unexpected(Expected::Key, env, event)),

            (Workers | BufferSize | BufferEvents, Event::Scalar { value, .. }) => {
                let context = self.context(env, event);
                let stage = record.stage_mut(self.field);
                match self.state {
                    Workers => {
                        stage.workers = count(value, env.numbers, context)?;
                        Ok(self.with_state(StageRoot))
                    }
                    BufferSize => {
                        stage.buffer.size = count(value, env.numbers, context)?;
                        Ok(self.with_state(Buffer))
                    }
                    _ => {
                        stage.buffer.events_count = count(value, env.numbers, context)?;
                        Ok(self.with_state(Buffer))
                    }
                }
            }
            (Workers | BufferSize | BufferEvents, _) => {
                Err(self.unexpected(Expected::Value, env, event))
            }
        }
    }
}

/// Convert count text according to the numeric policy.
fn count<T>(text: &str, policy: NumberPolicy, context: Context) -> Result<T>
where
    T: TryFrom<u64> + Default,
{
    match parse_unsigned(text) {
        Some(value) => Ok(value),
        None => match policy {
            NumberPolicy::Permissive => {
                debug!(text, position = %context.position, "non-numeric count stored as 0");
                Ok(T::default())
            }
            NumberPolicy::Strict => Err(ParseError::InvalidNumber {
                text: text.to_owned(),
                context,
            }),
        },
    }
}
