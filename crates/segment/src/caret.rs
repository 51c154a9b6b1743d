//! Caret resolution over the editable node sequence.
//!
//! The rendering layer reports a raw `Selection` in surface coordinates
//! (character offsets into a node's displayed text, separator included).
//! Resolution maps that into a clean, zero-based `CaretPosition`: offset 0
//! is the first content character, the separator region collapses onto it.
//! The engine never sees surface coordinates.

use crate::view::SegmentView;

/// Raw selection endpoints as the rendering layer reports them. A `None`
/// node means the endpoint fell outside any word node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Selection {
    pub anchor_node: Option<usize>,
    pub anchor_offset: usize,
    pub focus_node: Option<usize>,
    pub focus_offset: usize,
}

impl Selection {
    /// A collapsed selection at one surface position.
    pub fn caret(node: usize, offset: usize) -> Self {
        Self {
            anchor_node: Some(node),
            anchor_offset: offset,
            focus_node: Some(node),
            focus_offset: offset,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor_node == self.focus_node && self.anchor_offset == self.focus_offset
    }
}

/// Where editing should act: resolved node index, clean character offset,
/// and the selection shape flags the engine's preconditions need.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CaretPosition {
    pub node: Option<usize>,
    pub offset: usize,
    pub is_collapsed: bool,
    pub is_all_selected: bool,
}

impl CaretPosition {
    /// A collapsed caret in clean coordinates; this is what mutations report back.
    pub fn collapsed(node: usize, offset: usize) -> Self {
        Self {
            node: Some(node),
            offset,
            is_collapsed: true,
            is_all_selected: false,
        }
    }

    /// Caret outside any word node: every operation becomes a suppressed
    /// no-op.
    pub fn outside() -> Self {
        Self {
            node: None,
            offset: 0,
            is_collapsed: false,
            is_all_selected: false,
        }
    }

    /// Resolve a raw selection against the current view.
    ///
    /// Surface offsets inside the separator region clamp to clean offset 0;
    /// offsets past the content clamp to the node's maximum. An anchor node
    /// index the view doesn't know resolves to `outside`.
    pub fn resolve(selection: &Selection, view: &SegmentView) -> Self {
        let Some(anchor) = selection.anchor_node else {
            return Self::outside();
        };
        let Some(node) = view.node(anchor) else {
            return Self::outside();
        };

        let offset = selection
            .anchor_offset
            .saturating_sub(node.lead())
            .min(node.max_offset());

        Self {
            node: Some(anchor),
            offset,
            is_collapsed: selection.is_collapsed(),
            is_all_selected: is_all_selected(selection, view),
        }
    }
}

/// True only when the selection spans from the start of the first node's
/// content to the end of the last node's content.
fn is_all_selected(selection: &Selection, view: &SegmentView) -> bool {
    let (Some(anchor), Some(focus)) = (selection.anchor_node, selection.focus_node) else {
        return false;
    };
    if view.is_empty() || anchor != 0 || focus != view.len() - 1 {
        return false;
    }

    let first = match view.node(anchor) {
        Some(node) => node,
        None => return false,
    };
    let last = match view.node(focus) {
        Some(node) => node,
        None => return false,
    };

    selection.anchor_offset <= first.lead()
        && selection.focus_offset >= last.lead() + last.max_offset()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Segment;
    use segment_interface::{SegmentData, WordData};

    fn view(words: &[&str]) -> SegmentView {
        SegmentView::materialize(&Segment::from_data(SegmentData {
            text: words
                .iter()
                .map(|w| WordData {
                    word: (*w).into(),
                    start: 1.0,
                    end: 2.0,
                })
                .collect(),
            ..SegmentData::default()
        }))
    }

    #[test]
    fn separator_region_resolves_to_offset_zero() {
        let view = view(&["Hello"]);

        // surface " Hello": offsets 0 and 1 are both "node start"
        for surface in [0, 1] {
            let caret = CaretPosition::resolve(&Selection::caret(0, surface), &view);
            assert_eq!(caret.node, Some(0));
            assert_eq!(caret.offset, 0);
            assert!(caret.is_collapsed);
        }
    }

    #[test]
    fn content_offsets_shift_past_separator() {
        let view = view(&["Hello"]);

        let caret = CaretPosition::resolve(&Selection::caret(0, 6), &view);
        assert_eq!(caret.offset, 5);
    }

    #[test]
    fn offsets_past_content_clamp_to_max() {
        let view = view(&["Hi"]);

        let caret = CaretPosition::resolve(&Selection::caret(0, 40), &view);
        assert_eq!(caret.offset, 2);
    }

    #[test]
    fn no_anchor_resolves_outside() {
        let view = view(&["Hello"]);
        let selection = Selection {
            anchor_node: None,
            anchor_offset: 0,
            focus_node: None,
            focus_offset: 0,
        };

        let caret = CaretPosition::resolve(&selection, &view);
        assert_eq!(caret.node, None);
        assert!(!caret.is_all_selected);
    }

    #[test]
    fn unknown_node_index_resolves_outside() {
        let view = view(&["Hello"]);
        let caret = CaretPosition::resolve(&Selection::caret(9, 0), &view);
        assert_eq!(caret.node, None);
    }

    #[test]
    fn full_span_is_all_selected() {
        let view = view(&["Hello", "world"]);
        let selection = Selection {
            anchor_node: Some(0),
            anchor_offset: 1,
            focus_node: Some(1),
            focus_offset: 6, // " world" fully covered
        };

        let caret = CaretPosition::resolve(&selection, &view);
        assert!(caret.is_all_selected);
        assert!(!caret.is_collapsed);
    }

    #[test]
    fn partial_span_is_not_all_selected() {
        let view = view(&["Hello", "world"]);
        let selection = Selection {
            anchor_node: Some(0),
            anchor_offset: 1,
            focus_node: Some(1),
            focus_offset: 3,
        };

        assert!(!CaretPosition::resolve(&selection, &view).is_all_selected);
    }
}
