//! Bidirectional mapping between `Segment.words` and the editable node
//! sequence.
//!
//! A node's `text` is the editable surface content verbatim: synthesized
//! nodes carry a single leading separator space, and host write-backs may
//! carry entity artifacts or arbitrary whitespace. The model side stays
//! clean: extraction decodes, normalizes, and re-tokenizes.
//!
//! Whitespace is the word-boundary oracle on extraction: a node whose
//! decoded text does not begin with whitespace continues the previous word
//! (free-form typing can split the surface in ways that don't align with
//! word boundaries). The merged word keeps the first node's start and the
//! last node's end.

use std::borrow::Cow;
use std::ops::Range;

use crate::text::{char_len, normalize, split_words, unescape_entities};
use crate::types::{PLACEHOLDER, Segment, Word};

/// One editable word node: surface text plus node-level timing metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct WordNode {
    text: String,
    start: f64,
    end: f64,
}

impl WordNode {
    /// A node created by this crate: separator space + content.
    pub(crate) fn synthesized(text: &str, start: f64, end: f64) -> Self {
        Self {
            text: format!(" {text}"),
            start,
            end,
        }
    }

    /// The surface text, verbatim: what the editable node displays.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    /// True when the node holds nothing but separators/placeholder; the
    /// empty-segment placeholder is the canonical case.
    pub fn is_blank(&self) -> bool {
        normalize(&self.content(), true).is_empty()
    }

    /// Surface text with entity artifacts decoded; the string caret
    /// offsets are mapped against.
    pub(crate) fn content(&self) -> Cow<'_, str> {
        unescape_entities(&self.text)
    }

    /// Characters of leading whitespace in the content: the separator
    /// region that caret offset 0 sits after.
    pub(crate) fn lead(&self) -> usize {
        self.content()
            .chars()
            .take_while(|c| c.is_whitespace())
            .count()
    }

    /// The caret offset of the node's end of text, trailing whitespace
    /// ignored.
    pub(crate) fn end_offset(&self) -> usize {
        let content = self.content();
        char_len(content.trim_end()).saturating_sub(self.lead())
    }

    /// The largest representable caret offset (full content, untrimmed).
    pub(crate) fn max_offset(&self) -> usize {
        char_len(&self.content()).saturating_sub(self.lead())
    }
}

/// The live node sequence for one segment.
#[derive(Debug, Clone)]
pub struct SegmentView {
    nodes: Vec<WordNode>,
}

impl SegmentView {
    /// Materialize a segment: one node per word, or exactly one placeholder
    /// node (carrying the segment timestamp as both start and end) when the
    /// word list is empty.
    pub fn materialize(segment: &Segment) -> Self {
        let mut nodes: Vec<WordNode> = segment
            .words()
            .iter()
            .map(|word| {
                let (start, end) = word.timing_or(segment.timestamp);
                WordNode::synthesized(&word.text, start, end)
            })
            .collect();

        if nodes.is_empty() {
            nodes.push(WordNode::synthesized(
                PLACEHOLDER,
                segment.timestamp,
                segment.timestamp,
            ));
        }

        Self { nodes }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, index: usize) -> Option<&WordNode> {
        self.nodes.get(index)
    }

    pub fn nodes(&self) -> &[WordNode] {
        &self.nodes
    }

    /// Host write-back channel for un-intercepted plain typing: replaces a
    /// node's surface text verbatim. Timing metadata is untouched.
    pub fn set_node_text(&mut self, index: usize, text: impl Into<String>) {
        if let Some(node) = self.nodes.get_mut(index) {
            node.text = text.into();
        }
    }

    /// Read the node sequence back into clean words. Idempotent over
    /// materialization: no typing means the segment's own words come back,
    /// modulo whitespace normalization.
    pub fn extract(&self) -> Vec<Word> {
        self.extract_range(0..self.nodes.len())
    }

    pub(crate) fn extract_range(&self, range: Range<usize>) -> Vec<Word> {
        let mut chunks: Vec<(String, f64, f64)> = Vec::new();

        for node in &self.nodes[range] {
            let content = node.content();
            if content.is_empty() {
                continue;
            }

            let has_boundary = content
                .chars()
                .next()
                .is_some_and(|c| c.is_whitespace());

            match chunks.last_mut() {
                Some((text, _, end)) if !has_boundary => {
                    text.push_str(&content);
                    *end = node.end;
                }
                _ => chunks.push((content.into_owned(), node.start, node.end)),
            }
        }

        chunks
            .iter()
            .flat_map(|(text, start, end)| {
                split_words(text).map(|token| Word::new(token, *start, *end))
            })
            .collect()
    }

    pub(crate) fn insert_node(&mut self, index: usize, node: WordNode) {
        self.nodes.insert(index, node);
    }

    /// Replace the adjacent pair starting at `index` with one merged node.
    pub(crate) fn replace_pair(&mut self, index: usize, merged: WordNode) {
        self.nodes.splice(index..index + 2, [merged]);
    }

    /// Replace the node at `index` with the two halves of a split.
    pub(crate) fn replace_with_pair(&mut self, index: usize, first: WordNode, second: WordNode) {
        self.nodes.splice(index..index + 1, [first, second]);
    }

    pub(crate) fn truncate_nodes(&mut self, keep: usize) {
        self.nodes.truncate(keep);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use segment_interface::{SegmentData, WordData};

    fn segment(words: &[(&str, f64, f64)], timestamp: f64) -> Segment {
        Segment::from_data(SegmentData {
            timestamp,
            text: words
                .iter()
                .map(|&(word, start, end)| WordData {
                    word: word.into(),
                    start,
                    end,
                })
                .collect(),
            ..SegmentData::default()
        })
    }

    #[test]
    fn materialize_prefixes_separator_and_keeps_timing() {
        let view = SegmentView::materialize(&segment(
            &[("Hello", 0.1, 0.5), ("world", 0.6, 0.9)],
            0.0,
        ));

        assert_eq!(view.len(), 2);
        assert_eq!(view.node(0).unwrap().text(), " Hello");
        assert_eq!(view.node(1).unwrap().text(), " world");
        assert_eq!(view.node(0).unwrap().start(), 0.1);
        assert_eq!(view.node(1).unwrap().end(), 0.9);
    }

    #[test]
    fn empty_segment_materializes_one_placeholder() {
        let view = SegmentView::materialize(&segment(&[], 7.5));

        assert_eq!(view.len(), 1);
        let node = view.node(0).unwrap();
        assert!(node.is_blank());
        assert_eq!(node.start(), 7.5);
        assert_eq!(node.end(), 7.5);
    }

    #[test]
    fn placeholder_is_filtered_on_extract() {
        let view = SegmentView::materialize(&segment(&[], 7.5));
        assert!(view.extract().is_empty());
    }

    #[test]
    fn extract_round_trips_materialized_words() {
        let source = segment(&[("Hello", 0.1, 0.5), ("world", 0.6, 0.9)], 0.0);
        let view = SegmentView::materialize(&source);

        assert_eq!(view.extract(), source.words());
    }

    #[test]
    fn extract_decodes_entities_and_normalizes() {
        let mut view = SegmentView::materialize(&segment(&[("x", 1.0, 2.0)], 0.0));
        view.set_node_text(0, " Tom&nbsp;&amp;&nbsp;Jerry ");

        let words = view.extract();
        let texts: Vec<_> = words.iter().map(|w| w.text.as_str()).collect();
        assert_eq!(texts, ["Tom", "&", "Jerry"]);
        assert!(words.iter().all(|w| w.start == 1.0 && w.end == 2.0));
    }

    #[test]
    fn extract_splits_freely_typed_text_into_words() {
        let mut view =
            SegmentView::materialize(&segment(&[("Hello", 0.1, 0.5)], 0.0));
        view.set_node_text(0, " Hello brave world");

        let texts: Vec<_> = view.extract().iter().map(|w| w.text.clone()).collect();
        assert_eq!(texts, ["Hello", "brave", "world"]);
    }

    #[test]
    fn node_without_boundary_joins_previous_word() {
        let mut view = SegmentView::materialize(&segment(
            &[("Hel", 0.1, 0.3), ("lo", 0.3, 0.5), ("world", 0.6, 0.9)],
            0.0,
        ));
        // the surface lost the separator between the first two nodes
        view.set_node_text(1, "lo");

        let words = view.extract();
        assert_eq!(words.len(), 2);
        assert_eq!(words[0].text, "Hello");
        assert_eq!(words[0].start, 0.1);
        assert_eq!(words[0].end, 0.5);
        assert_eq!(words[1].text, "world");
    }

    #[test]
    fn emptied_node_vanishes_and_neighbors_join() {
        let mut view = SegmentView::materialize(&segment(
            &[("Hello", 0.1, 0.3), ("gone", 0.3, 0.5), ("world", 0.6, 0.9)],
            0.0,
        ));
        view.set_node_text(1, "");

        let texts: Vec<_> = view.extract().iter().map(|w| w.text.clone()).collect();
        assert_eq!(texts, ["Hello", "world"]);
    }

    #[test]
    fn line_break_pseudo_word_survives_extraction() {
        let view = SegmentView::materialize(&segment(
            &[("Hello", 0.1, 0.5), ("<br>", 0.1, 0.5), ("world", 0.6, 0.9)],
            0.0,
        ));

        let texts: Vec<_> = view.extract().iter().map(|w| w.text.clone()).collect();
        assert_eq!(texts, ["Hello", "<br>", "world"]);
    }

    #[test]
    fn zero_timed_words_inherit_segment_timestamp() {
        let view = SegmentView::materialize(&segment(&[("Hi", 0.0, 0.0)], 3.25));

        let node = view.node(0).unwrap();
        assert_eq!(node.start(), 3.25);
        assert_eq!(node.end(), 3.25);
    }

    #[test]
    fn caret_geometry_accessors() {
        let view = SegmentView::materialize(&segment(&[("Hello", 0.1, 0.5)], 0.0));
        let node = view.node(0).unwrap();

        assert_eq!(node.lead(), 1);
        assert_eq!(node.end_offset(), 5);
        assert_eq!(node.max_offset(), 5);
    }

    #[test]
    fn trailing_whitespace_moves_end_offset_not_max_offset() {
        let mut view = SegmentView::materialize(&segment(&[("Hello", 0.1, 0.5)], 0.0));
        view.set_node_text(0, " Hello  ");

        let node = view.node(0).unwrap();
        assert_eq!(node.end_offset(), 5);
        assert_eq!(node.max_offset(), 7);
    }
}
