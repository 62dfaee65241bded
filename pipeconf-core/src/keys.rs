//! The fixed keyword sets, one per mapping level.

use phf::phf_map;

use crate::config::StageField;

/// Keys of a pipeline entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PipelineKey {
    Name,
    Type,
    Stage(StageField),
}

/// Keys of a `transform`/`output` block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StageKey {
    Workers,
    Buffer,
}

/// Keys of a `buffer` block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BufferKey {
    Size,
    Events,
}

pub(crate) static PIPELINE_KEYS: phf::Map<&'static str, PipelineKey> = phf_map! {
    "pipeline_name" => PipelineKey::Name,
    "pipeline_type" => PipelineKey::Type,
    "transform" => PipelineKey::Stage(StageField::Transform),
    "output" => PipelineKey::Stage(StageField::Output),
};

pub(crate) static STAGE_KEYS: phf::Map<&'static str, StageKey> = phf_map! {
    "workers" => StageKey::Workers,
    "buffer" => StageKey::Buffer,
};

pub(crate) static BUFFER_KEYS: phf::Map<&'static str, BufferKey> = phf_map! {
    "size" => BufferKey::Size,
    "events" => BufferKey::Events,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_exact() {
        assert_eq!(PIPELINE_KEYS.get("output"), Some(&PipelineKey::Stage(StageField::Output)));
        assert_eq!(PIPELINE_KEYS.get("Output"), None);
        assert_eq!(PIPELINE_KEYS.get("output "), None);
        assert_eq!(STAGE_KEYS.get("workers"), Some(&StageKey::Workers));
        assert_eq!(BUFFER_KEYS.get("events"), Some(&BufferKey::Events));
        assert_eq!(BUFFER_KEYS.get("events_count"), None);
    }

    #[test]
    fn test_levels_do_not_share_keys() {
        for key in STAGE_KEYS.keys().chain(BUFFER_KEYS.keys()) {
            assert!(PIPELINE_KEYS.get(key).is_none(), "{key} leaked into pipeline keys");
        }
        for key in BUFFER_KEYS.keys() {
            assert!(STAGE_KEYS.get(key).is_none(), "{key} leaked into stage keys");
        }
    }
}
