//! YAML event source.
//!
//! Turns YAML text into the structural event stream the parser consumes.
//! Events are pulled one at a time from `yaml-rust2`'s event-level parser,
//! so no document tree is built and a syntax error in a later document
//! only surfaces once the parser gets there.
//!
//! Scalars keep their source text: `1.50`, `0x10`, `~` and `True` arrive
//! exactly as written. Only quoting and escapes are resolved. Spans are
//! byte ranges into the input; structural events get an empty span at
//! their position.

use std::str::Chars;

use thiserror::Error;
use yaml_rust2::parser::{Event as YamlEvent, Parser as YamlParser};
use yaml_rust2::scanner::{ScanError, TScalarStyle};

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::event::Event;
use crate::parser::Parser;
use crate::span::Span;

/// Failure of the YAML event source.
#[derive(Error, Debug)]
pub enum YamlError {
    #[error(transparent)]
    Scan(#[from] ScanError),

    /// Aliases refer back into a tree the parser never builds.
    #[error("alias at {span} is not supported")]
    Alias { span: Span },
}

/// Lazily produced events for a YAML stream.
pub struct YamlEvents<'de> {
    parser: YamlParser<Chars<'de>>,
    offsets: Offsets<'de>,
    finished: bool,
}

impl<'de> YamlEvents<'de> {
    pub fn new(text: &'de str) -> Self {
        Self {
            parser: YamlParser::new(text.chars()),
            offsets: Offsets::new(text),
            finished: false,
        }
    }

    fn convert(
        &mut self,
        event: YamlEvent,
        start: usize,
    ) -> std::result::Result<Option<Event<'static>>, YamlError> {
        let span = Span::new(offset(start), offset(start));
        let event = match event {
            YamlEvent::StreamStart { .. } => Event::StreamStart { span },
            YamlEvent::StreamEnd { .. } => {
                self.finished = true;
                Event::StreamEnd { span }
            }
            YamlEvent::DocumentStart { .. } => Event::DocumentStart { span },
            YamlEvent::DocumentEnd { .. } => Event::DocumentEnd { span },
            YamlEvent::SequenceStart { .. } => Event::SequenceStart { span },
            YamlEvent::SequenceEnd { .. } => Event::SequenceEnd { span },
            YamlEvent::MappingStart { .. } => Event::MappingStart { span },
            YamlEvent::MappingEnd { .. } => Event::MappingEnd { span },
            YamlEvent::Scalar(value, style, ..) => self.scalar(value, style, start),
            YamlEvent::Alias(..) => return Err(YamlError::Alias { span }),
            _ => return Ok(None),
        };
        Ok(Some(event))
    }

    fn scalar(&self, value: String, style: TScalarStyle, start: usize) -> Event<'static> {
        let written = &self.offsets.text[start.min(self.offsets.text.len())..];
        let plain = matches!(style, TScalarStyle::Plain);

        // An omitted value is reported as a plain `~` positioned on
        // whatever token follows it.
        if plain && value == "~" && !written.starts_with('~') {
            let span = Span::new(offset(start), offset(start));
            return Event::Scalar { value: String::new().into(), span };
        }

        let end = if plain && written.starts_with(value.as_str()) {
            start + value.len()
        } else {
            start
        };
        Event::Scalar {
            value: value.into(),
            span: Span::new(offset(start), offset(end)),
        }
    }
}

impl<'de> Iterator for YamlEvents<'de> {
    type Item = std::result::Result<Event<'static>, YamlError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.finished {
            let (event, mark) = match self.parser.next_token() {
                Ok(token) => token,
                Err(err) => {
                    self.finished = true;
                    return Some(Err(err.into()));
                }
            };
            let start = self.offsets.byte(mark.index());
            match self.convert(event, start) {
                Ok(Some(event)) => return Some(Ok(event)),
                Ok(None) => continue,
                Err(err) => {
                    self.finished = true;
                    return Some(Err(err));
                }
            }
        }
        None
    }
}

/// Maps the parser's character indices to byte offsets.
///
/// Marks arrive in non-decreasing order, so a forward cursor covers the
/// common case; a mark behind the cursor rescans from the start.
struct Offsets<'de> {
    text: &'de str,
    chars: usize,
    bytes: usize,
}

impl<'de> Offsets<'de> {
    fn new(text: &'de str) -> Self {
        Self { text, chars: 0, bytes: 0 }
    }

    fn byte(&mut self, index: usize) -> usize {
        if index < self.chars {
            self.chars = 0;
            self.bytes = 0;
        }
        let skip = index - self.chars;
        self.bytes += self.text[self.bytes..]
            .chars()
            .take(skip)
            .map(char::len_utf8)
            .sum::<usize>();
        self.chars = index;
        self.bytes
    }
}

fn offset(byte: usize) -> u32 {
    u32::try_from(byte).unwrap_or(u32::MAX)
}

impl Parser {
    /// Parse pipeline configurations from YAML text.
    pub fn parse_yaml(&self, text: &str) -> Result<Vec<PipelineConfig>> {
        self.parse(YamlEvents::new(text))
    }
}

/// Parse pipeline configurations from YAML text with default options.
pub fn parse_yaml(text: &str) -> Result<Vec<PipelineConfig>> {
    Parser::new().parse_yaml(text)
}
