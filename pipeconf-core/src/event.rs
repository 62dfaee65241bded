//! Document-structure events - the input of the pipeline parser.
//!
//! This is the SAX-style event model emitted by a document tokenizer:
//! structure is represented by start/end pairs and leaves arrive as
//! scalar text. The parser consumes these one at a time and never sees
//! the document as a tree.
//!
//! A single pipeline entry `{pipeline_name: ingest, transform: {workers: 4}}`
//! inside a top-level list arrives as:
//! ```text
//! StreamStart
//! DocumentStart
//! SequenceStart
//! MappingStart
//! Scalar("pipeline_name")
//! Scalar("ingest")
//! Scalar("transform")
//! MappingStart
//! Scalar("workers")
//! Scalar("4")
//! MappingEnd
//! MappingEnd
//! SequenceEnd
//! DocumentEnd
//! StreamEnd
//! ```

use std::borrow::Cow;
use std::fmt;

use crate::span::Span;

/// Structural and scalar events.
///
/// The lifetime `'a` refers to the source buffer when the tokenizer can
/// hand out borrowed scalar text; owned sources use `Event<'static>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event<'a> {
    // ========== Stream / Document ==========

    /// Tokenizer initialized.
    StreamStart { span: Span },

    /// Terminal event. Nothing follows it.
    StreamEnd { span: Span },

    DocumentStart { span: Span },
    DocumentEnd { span: Span },

    // ========== Collections ==========

    SequenceStart { span: Span },
    SequenceEnd { span: Span },

    MappingStart { span: Span },
    MappingEnd { span: Span },

    // ========== Leaves ==========

    /// Scalar text: a mapping key or a value, depending on position.
    Scalar { value: Cow<'a, str>, span: Span },
}

impl<'a> Event<'a> {
    /// Scalar event without position information.
    pub fn scalar(value: impl Into<Cow<'a, str>>) -> Self {
        Event::Scalar {
            value: value.into(),
            span: Span::default(),
        }
    }

    /// Fieldless event of the given kind without position information.
    ///
    /// Returns `None` for `EventKind::Scalar`, which needs text.
    pub fn structural(kind: EventKind) -> Option<Self> {
        let span = Span::default();
        Some(match kind {
            EventKind::StreamStart => Event::StreamStart { span },
            EventKind::StreamEnd => Event::StreamEnd { span },
            EventKind::DocumentStart => Event::DocumentStart { span },
            EventKind::DocumentEnd => Event::DocumentEnd { span },
            EventKind::SequenceStart => Event::SequenceStart { span },
            EventKind::SequenceEnd => Event::SequenceEnd { span },
            EventKind::MappingStart => Event::MappingStart { span },
            EventKind::MappingEnd => Event::MappingEnd { span },
            EventKind::Scalar => return None,
        })
    }

    /// Get the span for this event.
    pub fn span(&self) -> Span {
        match self {
            Event::StreamStart { span }
            | Event::StreamEnd { span }
            | Event::DocumentStart { span }
            | Event::DocumentEnd { span }
            | Event::SequenceStart { span }
            | Event::SequenceEnd { span }
            | Event::MappingStart { span }
            | Event::MappingEnd { span }
            | Event::Scalar { span, .. } => *span,
        }
    }

    /// Get the kind of this event, dropping its payload.
    pub fn kind(&self) -> EventKind {
        match self {
            Event::StreamStart { .. } => EventKind::StreamStart,
            Event::StreamEnd { .. } => EventKind::StreamEnd,
            Event::DocumentStart { .. } => EventKind::DocumentStart,
            Event::DocumentEnd { .. } => EventKind::DocumentEnd,
            Event::SequenceStart { .. } => EventKind::SequenceStart,
            Event::SequenceEnd { .. } => EventKind::SequenceEnd,
            Event::MappingStart { .. } => EventKind::MappingStart,
            Event::MappingEnd { .. } => EventKind::MappingEnd,
            Event::Scalar { .. } => EventKind::Scalar,
        }
    }

    /// Scalar text, if this is a scalar event.
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Event::Scalar { value, .. } => Some(value.as_ref()),
            _ => None,
        }
    }

    /// Detach from the source buffer.
    pub fn into_owned(self) -> Event<'static> {
        match self {
            Event::Scalar { value, span } => Event::Scalar {
                value: Cow::Owned(value.into_owned()),
                span,
            },
            Event::StreamStart { span } => Event::StreamStart { span },
            Event::StreamEnd { span } => Event::StreamEnd { span },
            Event::DocumentStart { span } => Event::DocumentStart { span },
            Event::DocumentEnd { span } => Event::DocumentEnd { span },
            Event::SequenceStart { span } => Event::SequenceStart { span },
            Event::SequenceEnd { span } => Event::SequenceEnd { span },
            Event::MappingStart { span } => Event::MappingStart { span },
            Event::MappingEnd { span } => Event::MappingEnd { span },
        }
    }
}

/// Event category, used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    StreamStart,
    StreamEnd,
    DocumentStart,
    DocumentEnd,
    SequenceStart,
    SequenceEnd,
    MappingStart,
    MappingEnd,
    Scalar,
}

impl EventKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::StreamStart => "stream start",
            Self::StreamEnd => "stream end",
            Self::DocumentStart => "document start",
            Self::DocumentEnd => "document end",
            Self::SequenceStart => "sequence start",
            Self::SequenceEnd => "sequence end",
            Self::MappingStart => "mapping start",
            Self::MappingEnd => "mapping end",
            Self::Scalar => "scalar",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
