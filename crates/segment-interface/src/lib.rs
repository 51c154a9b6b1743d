//! Host-facing wire format for speech-segment blocks.
//!
//! These are the shapes the block host reads and writes on `save`/`load`,
//! plus the static metadata the host inspects at registration time. No
//! behavior lives here; the editing core is in the `segment` crate.

mod meta;

pub use meta::{BlockMeta, SanitizeRules, TextRules, Toolbox};

/// One persisted word: text plus its timing range in seconds.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "specta", derive(specta::Type))]
pub struct WordData {
    pub word: String,
    pub start: f64,
    pub end: f64,
}

/// A speaker reference as the host stores it.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "specta", derive(specta::Type))]
pub struct SpeakerRef {
    pub id: u64,
    pub name: String,
    pub icon: Option<String>,
}

/// Wire speaker field: legacy documents carry a plain name, newer ones a
/// structured reference.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "specta", derive(specta::Type))]
#[serde(untagged)]
pub enum SpeakerData {
    Ref(SpeakerRef),
    Name(String),
}

impl SpeakerData {
    pub fn display_name(&self) -> &str {
        match self {
            Self::Ref(speaker) => &speaker.name,
            Self::Name(name) => name,
        }
    }
}

impl Default for SpeakerData {
    fn default() -> Self {
        Self::Name(SegmentData::DEFAULT_SPEAKER.to_string())
    }
}

/// Persisted shape of one speech segment.
///
/// `id` is `null` for segments the host created without an identity (the
/// default block); every other field always serializes.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "specta", derive(specta::Type))]
pub struct SegmentData {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub speaker: SpeakerData,
    #[serde(default)]
    pub timestamp: f64,
    #[serde(default, rename = "wasSplit")]
    pub was_split: bool,
    #[serde(default)]
    pub text: Vec<WordData>,
}

impl SegmentData {
    pub const DEFAULT_SPEAKER: &'static str = "Unknown Speaker";
}

impl Default for SegmentData {
    fn default() -> Self {
        Self {
            id: None,
            speaker: SpeakerData::default(),
            timestamp: 0.0,
            was_split: false,
            text: Vec::new(),
        }
    }
}
