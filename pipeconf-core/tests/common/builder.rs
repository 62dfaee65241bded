//! Builders for structural event streams.
//!
//! Tests describe pipelines as [`PipelineSpec`]s and get back both the
//! event stream a tokenizer would emit and the record the parser should
//! produce for it.

use std::str::FromStr;

use pipeconf_core::{BufferConfig, Event, EventKind, PipelineConfig, StageConfig};

/// Fieldless event of the given kind.
pub fn ev(kind: EventKind) -> Event<'static> {
    Event::structural(kind).expect("structural kind")
}

/// One stage block. Values are raw scalar text so tests can feed
/// non-numeric input.
#[derive(Debug, Clone, Default)]
pub struct StageSpec {
    pub workers: Option<String>,
    /// Emit a `buffer` block (possibly empty).
    pub buffer: bool,
    pub size: Option<String>,
    pub events: Option<String>,
}

impl StageSpec {
    pub fn new(workers: u32, size: u64, events: u64) -> Self {
        Self {
            workers: Some(workers.to_string()),
            buffer: true,
            size: Some(size.to_string()),
            events: Some(events.to_string()),
        }
    }

    fn push_events(&self, out: &mut Vec<Event<'static>>) {
        out.push(ev(EventKind::MappingStart));
        if let Some(workers) = &self.workers {
            out.push(Event::scalar("workers"));
            out.push(Event::scalar(workers.clone()));
        }
        if self.buffer {
            out.push(Event::scalar("buffer"));
            out.push(ev(EventKind::MappingStart));
            if let Some(size) = &self.size {
                out.push(Event::scalar("size"));
                out.push(Event::scalar(size.clone()));
            }
            if let Some(events) = &self.events {
                out.push(Event::scalar("events"));
                out.push(Event::scalar(events.clone()));
            }
            out.push(ev(EventKind::MappingEnd));
        }
        out.push(ev(EventKind::MappingEnd));
    }

    /// Record the permissive parser should build: unparsable text is 0.
    pub fn expected(&self) -> StageConfig {
        let count = |text: &Option<String>| text.as_deref().map(expected_count).unwrap_or(0);
        StageConfig {
            workers: self.workers.as_deref().map(expected_count).unwrap_or(0),
            buffer: if self.buffer {
                BufferConfig {
                    size: count(&self.size),
                    events_count: count(&self.events),
                }
            } else {
                BufferConfig::default()
            },
        }
    }
}

/// Value a count field holds for `text` under the permissive policy.
///
/// Surrounding ASCII whitespace and one leading `+` are accepted; anything
/// else that is not all digits, or does not fit, is 0.
pub fn expected_count<T: FromStr + Default>(text: &str) -> T {
    let trimmed = text.trim_matches(|c: char| c.is_ascii_whitespace());
    let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return T::default();
    }
    digits.parse().unwrap_or_default()
}

/// One pipeline entry.
#[derive(Debug, Clone, Default)]
pub struct PipelineSpec {
    pub name: Option<String>,
    pub kind: Option<String>,
    pub transform: Option<StageSpec>,
    pub output: Option<StageSpec>,
}

impl PipelineSpec {
    pub fn named(name: &str, kind: &str) -> Self {
        Self {
            name: Some(name.to_owned()),
            kind: Some(kind.to_owned()),
            ..Self::default()
        }
    }

    pub fn transform(mut self, stage: StageSpec) -> Self {
        self.transform = Some(stage);
        self
    }

    pub fn output(mut self, stage: StageSpec) -> Self {
        self.output = Some(stage);
        self
    }

    pub fn events(&self) -> Vec<Event<'static>> {
        let mut out = vec![ev(EventKind::MappingStart)];
        if let Some(name) = &self.name {
            out.push(Event::scalar("pipeline_name"));
            out.push(Event::scalar(name.clone()));
        }
        if let Some(kind) = &self.kind {
            out.push(Event::scalar("pipeline_type"));
            out.push(Event::scalar(kind.clone()));
        }
        if let Some(stage) = &self.transform {
            out.push(Event::scalar("transform"));
            stage.push_events(&mut out);
        }
        if let Some(stage) = &self.output {
            out.push(Event::scalar("output"));
            stage.push_events(&mut out);
        }
        out.push(ev(EventKind::MappingEnd));
        out
    }

    pub fn expected(&self) -> PipelineConfig {
        PipelineConfig {
            name: self.name.clone().unwrap_or_default(),
            kind: self.kind.clone().unwrap_or_default(),
            transform: self.transform.as_ref().map(StageSpec::expected).unwrap_or_default(),
            output: self.output.as_ref().map(StageSpec::expected).unwrap_or_default(),
        }
    }
}

/// A full stream: `StreamStart DocumentStart SequenceStart ... SequenceEnd DocumentEnd StreamEnd`.
#[derive(Debug, Clone)]
pub struct DocBuilder {
    events: Vec<Event<'static>>,
}

impl DocBuilder {
    pub fn new() -> Self {
        Self {
            events: vec![
                ev(EventKind::StreamStart),
                ev(EventKind::DocumentStart),
                ev(EventKind::SequenceStart),
            ],
        }
    }

    pub fn pipeline(mut self, spec: &PipelineSpec) -> Self {
        self.events.extend(spec.events());
        self
    }

    /// Append arbitrary events inside the top-level sequence.
    pub fn raw(mut self, events: impl IntoIterator<Item = Event<'static>>) -> Self {
        self.events.extend(events);
        self
    }

    pub fn finish(mut self) -> Vec<Event<'static>> {
        self.events.extend([
            ev(EventKind::SequenceEnd),
            ev(EventKind::DocumentEnd),
            ev(EventKind::StreamEnd),
        ]);
        self.events
    }
}
