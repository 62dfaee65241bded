//! Parse errors and the diagnostic context attached to them.

use std::fmt;

use thiserror::Error;

use crate::config::StageField;
use crate::event::EventKind;
use crate::span::Span;
use crate::stage::StageState;

/// Boxed error produced by an event source.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that abort a parse. The first one wins; no records survive it.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("unknown key `{key}` in {context}")]
    UnknownKey { key: String, context: Context },

    #[error("expected {expected}, found {actual} in {context}")]
    UnexpectedEvent {
        expected: Expected,
        actual: EventKind,
        context: Context,
    },

    /// Only raised under [`NumberPolicy::Strict`](crate::NumberPolicy::Strict).
    #[error("invalid number `{text}` in {context}")]
    InvalidNumber { text: String, context: Context },

    #[error("event stream ended without stream end in {context}")]
    UnexpectedEnd { context: Context },

    #[error("more than {limit} pipelines")]
    CapacityExceeded { limit: usize },

    #[error("event source failed: {0}")]
    Source(#[source] BoxError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ParseError {
    /// Wrap a failure of the event source.
    pub fn source_failure(err: impl Into<BoxError>) -> Self {
        ParseError::Source(err.into())
    }

    /// Automaton position of the error, for structural and semantic errors.
    pub fn context(&self) -> Option<&Context> {
        match self {
            ParseError::UnknownKey { context, .. }
            | ParseError::UnexpectedEvent { context, .. }
            | ParseError::InvalidNumber { context, .. }
            | ParseError::UnexpectedEnd { context } => Some(context),
            ParseError::CapacityExceeded { .. } | ParseError::Source(_) | ParseError::Io(_) => None,
        }
    }
}

pub type Result<T, E = ParseError> = std::result::Result<T, E>;

/// What the automaton would have accepted at the failing position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    /// A key scalar or the end of the current mapping.
    Key,
    /// A scalar value.
    Value,
    /// The start of a nested mapping.
    Mapping,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Expected::Key => "a key or mapping end",
            Expected::Value => "a scalar value",
            Expected::Mapping => "a mapping",
        })
    }
}

/// Where in the fixed grammar the automaton was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    TopLevel,
    Pipeline,
    PipelineName,
    PipelineType,
    Stage { field: StageField, state: StageState },
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::TopLevel => f.write_str("top level"),
            Position::Pipeline => f.write_str("pipeline"),
            Position::PipelineName => f.write_str("pipeline_name value"),
            Position::PipelineType => f.write_str("pipeline_type value"),
            Position::Stage { field, state } => {
                let key = field.key();
                match state {
                    StageState::Opening => write!(f, "{key} (awaiting mapping)"),
                    StageState::StageRoot => write!(f, "{key}"),
                    StageState::Workers => write!(f, "{key}.workers value"),
                    StageState::BufferOpening => write!(f, "{key}.buffer (awaiting mapping)"),
                    StageState::Buffer => write!(f, "{key}.buffer"),
                    StageState::BufferSize => write!(f, "{key}.buffer.size value"),
                    StageState::BufferEvents => write!(f, "{key}.buffer.events value"),
                }
            }
        }
    }
}

/// Diagnostic context for an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Context {
    /// 1-based ordinal of the pipeline entry being parsed (0 at top level).
    pub pipeline: usize,
    pub position: Position,
    /// Span of the offending event.
    pub span: Span,
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.position == Position::TopLevel {
            f.write_str("top level")?;
        } else {
            write!(f, "pipeline #{}, {}", self.pipeline, self.position)?;
        }
        if !self.span.is_unknown() {
            write!(f, " (at {})", self.span)?;
        }
        Ok(())
    }
}
