//! The block facade: the host-boundary contract for one speech segment.
//!
//! A `SpeechBlock` owns its segment and live view for the block instance's
//! lifetime. The host renders the view, routes intercepted keys through
//! [`handle_key`](SpeechBlock::handle_key), writes plain typing back via
//! [`set_node_text`](SpeechBlock::set_node_text), and reads the wire shape
//! out with [`save`](SpeechBlock::save).

use segment_interface::{BlockMeta, SegmentData, SpeakerData, SpeakerRef};

use crate::caret::{CaretPosition, Selection};
use crate::engine::{self, EditCommand, EditOutcome};
use crate::speaker::SpeakerPicker;
use crate::text::format_timestamp;
use crate::types::Segment;
use crate::view::SegmentView;

/// Host-provided tool configuration.
#[derive(Debug, Clone, Default)]
pub struct BlockConfig {
    pub speakers: Vec<SpeakerRef>,
}

pub struct SpeechBlock {
    segment: Segment,
    view: SegmentView,
    picker: SpeakerPicker,
    read_only: bool,
}

impl SpeechBlock {
    /// Registration metadata the host inspects once per tool.
    pub const META: BlockMeta = BlockMeta::SPEECH;

    pub fn new(data: Option<SegmentData>, config: BlockConfig, read_only: bool) -> Self {
        let segment = Segment::from_data(data.unwrap_or_default());
        let view = SegmentView::materialize(&segment);
        Self {
            segment,
            view,
            picker: SpeakerPicker::new(config.speakers),
            read_only,
        }
    }

    pub fn segment(&self) -> &Segment {
        &self.segment
    }

    pub fn view(&self) -> &SegmentView {
        &self.view
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Re-materialize the node sequence from the model and hand it to the
    /// host for display.
    pub fn render(&mut self) -> &SegmentView {
        self.view = SegmentView::materialize(&self.segment);
        &self.view
    }

    /// Replace the model and swap the rendered view in place.
    pub fn set_data(&mut self, data: SegmentData) {
        self.segment = Segment::from_data(data);
        self.render();
    }

    /// Read the live nodes back into the wire shape. A fully emptied
    /// surface saves a truly empty word list; the placeholder is a view
    /// artifact and reappears on the next render.
    pub fn save(&mut self) -> SegmentData {
        let words = self.view.extract();
        self.segment.set_words(words);
        self.segment.to_data()
    }

    /// Plain-typing write-back from the host surface.
    pub fn set_node_text(&mut self, index: usize, text: impl Into<String>) {
        self.view.set_node_text(index, text);
    }

    /// Resolve the host's raw selection against the current view.
    pub fn resolve_caret(&self, selection: &Selection) -> CaretPosition {
        CaretPosition::resolve(selection, &self.view)
    }

    /// Route one intercepted key through the edit engine.
    pub fn handle_key(&mut self, caret: &CaretPosition, command: EditCommand) -> EditOutcome {
        if self.read_only {
            // No listener is attached to a read-only surface.
            return EditOutcome::PassThrough;
        }
        engine::handle(&mut self.segment, &mut self.view, caret, command)
    }

    /// Host lifecycle notification. Logged, deliberately nothing else.
    pub fn moved(&self, event: &str) {
        tracing::debug!(id = ?self.segment.id, event, "speech block moved");
    }

    // ── Speaker popover boundary ────────────────────────────────────────

    pub fn picker(&self) -> &SpeakerPicker {
        &self.picker
    }

    pub fn open_speaker_picker(&mut self) {
        self.picker.open(&self.segment);
    }

    pub fn close_speaker_picker(&mut self) {
        self.picker.close();
    }

    /// Resolve a popover click. On success the segment's speaker is
    /// reassigned (opaquely) and the change surfaces as an outcome value;
    /// anything else degrades to a suppressed no-op.
    pub fn pick_speaker(&mut self, payload: &str) -> EditOutcome {
        if self.read_only {
            return EditOutcome::NoOp;
        }
        match self.picker.pick(payload) {
            Some(speaker) => {
                self.apply_speaker(speaker.clone());
                EditOutcome::SpeakerChangeRequested { speaker }
            }
            None => EditOutcome::NoOp,
        }
    }

    pub fn apply_speaker(&mut self, speaker: SpeakerRef) {
        self.segment.speaker = SpeakerData::Ref(speaker);
    }

    // ── Label rendering ─────────────────────────────────────────────────

    pub fn timestamp_label(&self) -> String {
        format_timestamp(self.segment.timestamp)
    }

    pub fn speaker_label(&self) -> &str {
        self.segment.speaker.display_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use segment_interface::WordData;

    fn data(words: &[(&str, f64, f64)]) -> SegmentData {
        SegmentData {
            text: words
                .iter()
                .map(|&(word, start, end)| WordData {
                    word: word.into(),
                    start,
                    end,
                })
                .collect(),
            ..SegmentData::default()
        }
    }

    #[test]
    fn default_block_renders_single_placeholder() {
        let block = SpeechBlock::new(None, BlockConfig::default(), false);

        assert_eq!(block.view().len(), 1);
        assert!(block.view().node(0).unwrap().is_blank());
        assert_eq!(block.speaker_label(), "Unknown Speaker");
    }

    #[test]
    fn save_round_trips_unedited_words() {
        let source = data(&[("Hello", 0.1, 0.5), ("world", 0.6, 0.9)]);
        let mut block = SpeechBlock::new(Some(source.clone()), BlockConfig::default(), false);

        assert_eq!(block.save(), source);
    }

    #[test]
    fn emptied_surface_saves_empty_list_and_rerenders_placeholder() {
        let mut block = SpeechBlock::new(
            Some(data(&[("Hello", 0.1, 0.5)])),
            BlockConfig::default(),
            false,
        );
        block.set_node_text(0, "");

        let saved = block.save();
        assert!(saved.text.is_empty());

        block.render();
        assert_eq!(block.view().len(), 1);
        assert!(block.view().node(0).unwrap().is_blank());
    }

    #[test]
    fn split_through_the_block_flags_and_hands_off_remainder() {
        let mut block = SpeechBlock::new(
            Some(data(&[
                ("A", 0.0, 1.0),
                ("B", 1.0, 2.0),
                ("C", 2.0, 3.0),
                ("D", 3.0, 4.0),
            ])),
            BlockConfig::default(),
            false,
        );

        let outcome = block.handle_key(
            &CaretPosition::collapsed(1, 1),
            EditCommand::Enter { split_segment: true },
        );

        let EditOutcome::SplitRequested { remainder } = outcome else {
            panic!("expected SplitRequested, got {outcome:?}");
        };
        let moved: Vec<_> = remainder.iter().map(|w| w.text.clone()).collect();
        assert_eq!(moved, ["C", "D"]);

        let saved = block.save();
        assert!(saved.was_split);
        let kept: Vec<_> = saved.text.iter().map(|w| w.word.clone()).collect();
        assert_eq!(kept, ["A", "B"]);
    }

    #[test]
    fn read_only_block_intercepts_nothing() {
        let mut block = SpeechBlock::new(
            Some(data(&[("Hello", 0.0, 1.0), ("world", 1.0, 2.0)])),
            BlockConfig::default(),
            true,
        );

        let outcome = block.handle_key(&CaretPosition::collapsed(1, 0), EditCommand::Backspace);
        assert_eq!(outcome, EditOutcome::PassThrough);
        assert_eq!(block.save().text.len(), 2);
    }

    #[test]
    fn set_data_swaps_view_in_place() {
        let mut block = SpeechBlock::new(
            Some(data(&[("old", 0.0, 1.0)])),
            BlockConfig::default(),
            false,
        );

        block.set_data(data(&[("new", 0.0, 1.0), ("words", 1.0, 2.0)]));

        assert_eq!(block.view().len(), 2);
        assert_eq!(block.view().node(0).unwrap().text(), " new");
    }

    #[test]
    fn pick_speaker_applies_and_surfaces_the_change() {
        let alice = SpeakerRef {
            id: 1,
            name: "Alice".into(),
            icon: None,
        };
        let mut block = SpeechBlock::new(
            None,
            BlockConfig {
                speakers: vec![alice.clone()],
            },
            false,
        );
        block.open_speaker_picker();

        let outcome = block.pick_speaker(r#"{"id": 1, "name": "Alice", "icon": null}"#);

        assert_eq!(
            outcome,
            EditOutcome::SpeakerChangeRequested { speaker: alice }
        );
        assert_eq!(block.speaker_label(), "Alice");
    }

    #[test]
    fn malformed_speaker_payload_degrades_to_noop() {
        let mut block = SpeechBlock::new(None, BlockConfig::default(), false);

        let outcome = block.pick_speaker("{broken");

        assert_eq!(outcome, EditOutcome::NoOp);
        assert_eq!(block.speaker_label(), "Unknown Speaker");
    }

    #[test]
    fn timestamp_label_formats_segment_timestamp() {
        let block = SpeechBlock::new(
            Some(SegmentData {
                timestamp: 65.0,
                ..SegmentData::default()
            }),
            BlockConfig::default(),
            false,
        );

        assert_eq!(block.timestamp_label(), "01:05");
    }
}
