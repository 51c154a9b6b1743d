//! The word/segment model: plain values plus the aggregate's invariants.

use segment_interface::{SegmentData, SpeakerData, WordData};

/// Line-break pseudo-word text. The only markup the sanitize rules let
/// through inside `text`, so it survives a save/load round trip.
pub const LINE_BREAK: &str = "<br>";

/// Placeholder text for the single node an empty segment renders as.
/// Filtered out by extraction, but structurally mergeable and splittable.
pub const PLACEHOLDER: &str = "\u{a0}";

/// One timestamped token. `text` never carries encoded entities or
/// separator whitespace; that normalization happens at extraction.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Word {
    pub text: String,
    pub start: f64,
    pub end: f64,
}

impl Word {
    pub fn new(text: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            text: text.into(),
            start,
            end,
        }
    }

    pub fn is_line_break(&self) -> bool {
        self.text == LINE_BREAK
    }

    /// Timing for rendering. Words that never had an independent timing
    /// source (zero or unparseable attributes) take the segment timestamp
    /// for both fields.
    pub(crate) fn timing_or(&self, fallback: f64) -> (f64, f64) {
        let missing = |t: f64| t == 0.0 || t.is_nan();
        if missing(self.start) || missing(self.end) {
            (fallback, fallback)
        } else {
            (self.start, self.end)
        }
    }
}

impl From<WordData> for Word {
    fn from(data: WordData) -> Self {
        Self {
            text: data.word,
            start: data.start,
            end: data.end,
        }
    }
}

impl From<Word> for WordData {
    fn from(word: Word) -> Self {
        Self {
            word: word.text,
            start: word.start,
            end: word.end,
        }
    }
}

/// One speaker turn: identity, timestamp, and the ordered word list.
///
/// `words` and `was_split` are deliberately not public: the edit engine and
/// the view synchronizer are the only writers, and `was_split` only ever
/// flips to `true`.
#[derive(Debug, Clone)]
pub struct Segment {
    pub id: Option<u64>,
    pub speaker: SpeakerData,
    pub timestamp: f64,
    was_split: bool,
    words: Vec<Word>,
}

impl Segment {
    pub fn from_data(data: SegmentData) -> Self {
        Self {
            id: data.id,
            speaker: data.speaker,
            timestamp: data.timestamp,
            was_split: data.was_split,
            words: data.text.into_iter().map(Word::from).collect(),
        }
    }

    pub fn to_data(&self) -> SegmentData {
        SegmentData {
            id: self.id,
            speaker: self.speaker.clone(),
            timestamp: self.timestamp,
            was_split: self.was_split,
            text: self.words.iter().cloned().map(WordData::from).collect(),
        }
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn was_split(&self) -> bool {
        self.was_split
    }

    pub(crate) fn set_words(&mut self, words: Vec<Word>) {
        self.words = words;
    }

    pub(crate) fn mark_split(&mut self) {
        self.was_split = true;
    }
}

impl Default for Segment {
    fn default() -> Self {
        Self::from_data(SegmentData::default())
    }
}
