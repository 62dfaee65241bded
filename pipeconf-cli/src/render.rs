//! Output formats for parsed records.

use std::fmt::{self, Write as _};

use pipeconf_core::{PipelineConfig, StageConfig};

#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Indented `key: value` dump, one block per pipeline
    #[default]
    Text,
    /// JSON array of records
    Json,
}

pub fn render(records: &[PipelineConfig], format: OutputFormat) -> anyhow::Result<String> {
    let mut out = String::new();
    match format {
        OutputFormat::Text => {
            for record in records {
                text(&mut out, record)?;
            }
        }
        OutputFormat::Json => {
            out = serde_json::to_string_pretty(records)?;
            out.push('\n');
        }
    }
    Ok(out)
}

fn text(out: &mut String, record: &PipelineConfig) -> fmt::Result {
    writeln!(out, "pipe name: {}", record.name)?;
    writeln!(out, "pipe type: {}", record.kind)?;
    stage(out, "transform", &record.transform)?;
    stage(out, "output", &record.output)
}

fn stage(out: &mut String, key: &str, stage: &StageConfig) -> fmt::Result {
    writeln!(out, "{key}:")?;
    writeln!(out, "  workers: {}", stage.workers)?;
    writeln!(out, "  buffer:")?;
    writeln!(out, "    size: {}", stage.buffer.size)?;
    writeln!(out, "    events: {}", stage.buffer.events_count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pipeconf_core::BufferConfig;
    use pretty_assertions::assert_eq;

    fn sample() -> PipelineConfig {
        PipelineConfig {
            name: "ingest".into(),
            kind: "batch".into(),
            transform: StageConfig {
                workers: 4,
                buffer: BufferConfig { size: 1024, events_count: 10 },
            },
            output: StageConfig::default(),
        }
    }

    #[test]
    fn test_text_layout() {
        let out = render(&[sample()], OutputFormat::Text).unwrap();
        assert_eq!(
            out,
            "pipe name: ingest\n\
             pipe type: batch\n\
             transform:\n  workers: 4\n  buffer:\n    size: 1024\n    events: 10\n\
             output:\n  workers: 0\n  buffer:\n    size: 0\n    events: 0\n"
        );
    }

    #[test]
    fn test_json_fields() {
        let out = render(&[sample()], OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["name"], "ingest");
        assert_eq!(value[0]["type"], "batch");
        assert_eq!(value[0]["transform"]["buffer"]["events_count"], 10);
    }

    #[test]
    fn test_text_blocks_in_order() {
        let mut second = sample();
        second.name = "export".into();
        let out = render(&[sample(), second], OutputFormat::Text).unwrap();
        let names: Vec<_> = out.lines().filter(|l| l.starts_with("pipe name:")).collect();
        assert_eq!(names, ["pipe name: ingest", "pipe name: export"]);
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(render(&[], OutputFormat::Text).unwrap(), "");
    }
}
