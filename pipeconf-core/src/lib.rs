//! pipeconf core parser
//!
//! Event-driven parser for pipeline configuration documents. Consumes
//! structural events (stream/document/mapping/sequence boundaries and
//! scalars) and produces validated [`PipelineConfig`] records without
//! building a document tree.
//!
//! # Architecture
//!
//! - **event.rs** - Event taxonomy consumed from a tokenizer
//! - **root.rs** - Root automaton and the pure `transition` function
//! - **stage.rs** - Stage automaton for `transform`/`output` blocks
//! - **parser.rs** - Driver, options, record sinks
//! - **source.rs** - YAML event source (feature `yaml`)
//!
//! # Example
//!
//! ```
//! use pipeconf_core::{parse_events, Event, EventKind};
//!
//! let start = |k| Event::structural(k).unwrap();
//! let events = vec![
//!     start(EventKind::StreamStart),
//!     start(EventKind::MappingStart),
//!     Event::scalar("pipeline_name"),
//!     Event::scalar("ingest"),
//!     Event::scalar("transform"),
//!     start(EventKind::MappingStart),
//!     Event::scalar("workers"),
//!     Event::scalar("4"),
//!     start(EventKind::MappingEnd),
//!     start(EventKind::MappingEnd),
//!     start(EventKind::StreamEnd),
//! ];
//!
//! let records = parse_events(events).unwrap();
//! assert_eq!(records[0].name, "ingest");
//! assert_eq!(records[0].transform.workers, 4);
//! ```

pub mod config;
pub mod error;
pub mod event;
mod keys;
pub mod number;
pub mod parser;
pub mod root;
#[cfg(feature = "yaml")]
pub mod source;
pub mod span;
pub mod stage;

pub use config::{BufferConfig, PipelineConfig, StageConfig, StageField};
pub use error::{BoxError, Context, Expected, ParseError, Position, Result};
pub use event::{Event, EventKind};
pub use number::NumberPolicy;
pub use parser::{parse, parse_events, Parser, ParserOptions, RecordSink};
pub use root::{transition, ParserState, Phase, Transition, ValueMode};
#[cfg(feature = "yaml")]
pub use source::{parse_yaml, YamlError, YamlEvents};
pub use span::Span;
pub use stage::{StageParser, StageState, StageStep};
