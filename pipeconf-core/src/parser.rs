//! Driver: pulls events from a source and runs the automaton to completion.

use std::convert::Infallible;

use tracing::debug;

use crate::config::PipelineConfig;
use crate::error::{BoxError, ParseError, Result};
use crate::event::Event;
use crate::number::NumberPolicy;
use crate::root::{transition, ParserState};
use crate::span::Span;

/// Parser configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParserOptions {
    /// Maximum number of pipelines accepted; `None` is unbounded.
    pub max_records: Option<usize>,
    pub numbers: NumberPolicy,
}

impl ParserOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_records(mut self, limit: usize) -> Self {
        self.max_records = Some(limit);
        self
    }

    pub fn numbers(mut self, policy: NumberPolicy) -> Self {
        self.numbers = policy;
        self
    }
}

/// Receives completed records, taking ownership of each.
pub trait RecordSink {
    fn accept(&mut self, record: PipelineConfig) -> Result<()>;
}

impl RecordSink for Vec<PipelineConfig> {
    fn accept(&mut self, record: PipelineConfig) -> Result<()> {
        self.push(record);
        Ok(())
    }
}

/// Pipeline configuration parser.
#[derive(Debug, Clone, Copy, Default)]
pub struct Parser {
    options: ParserOptions,
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ParserOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Parse a complete event stream into records.
    ///
    /// All or nothing: on error no records are returned.
    pub fn parse<'a, I, E>(&self, events: I) -> Result<Vec<PipelineConfig>>
    where
        I: IntoIterator<Item = std::result::Result<Event<'a>, E>>,
        E: Into<BoxError>,
    {
        let mut records = Vec::new();
        self.parse_into(events, &mut records)?;
        Ok(records)
    }

    /// Parse an event stream, handing each completed record to `sink`.
    ///
    /// Stops at the first `StreamEnd` and returns the number of records
    /// accepted. Records delivered before an error stay with the sink;
    /// callers wanting all-or-nothing semantics use [`Parser::parse`].
    pub fn parse_into<'a, I, E, S>(&self, events: I, sink: &mut S) -> Result<usize>
    where
        I: IntoIterator<Item = std::result::Result<Event<'a>, E>>,
        E: Into<BoxError>,
        S: RecordSink + ?Sized,
    {
        let mut state = ParserState::new(self.options.numbers);
        let mut accepted = 0;

        for event in events {
            let event = event.map_err(ParseError::source_failure)?;
            let step = transition(state, &event)?;
            state = step.state;

            if let Some(record) = step.completed {
                if let Some(limit) = self.options.max_records {
                    if accepted >= limit {
                        return Err(ParseError::CapacityExceeded { limit });
                    }
                }
                sink.accept(record)?;
                accepted += 1;
            }

            if state.is_done() {
                debug!(pipelines = accepted, "parse finished");
                return Ok(accepted);
            }
        }

        Err(ParseError::UnexpectedEnd {
            context: state.context(Span::default()),
        })
    }
}

/// Parse a fallible event stream with default options.
pub fn parse<'a, I, E>(events: I) -> Result<Vec<PipelineConfig>>
where
    I: IntoIterator<Item = std::result::Result<Event<'a>, E>>,
    E: Into<BoxError>,
{
    Parser::new().parse(events)
}

/// Parse an in-memory event list with default options.
pub fn parse_events<'a, I>(events: I) -> Result<Vec<PipelineConfig>>
where
    I: IntoIterator<Item = Event<'a>>,
{
    parse(events.into_iter().map(Ok::<_, Infallible>))
}
