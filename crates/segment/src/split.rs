//! Segment-split coordinator: partitions the word list when the user
//! forces an early exit from the segment (Enter + modifier).
//!
//! The coordinator only computes the partition and surfaces the remainder;
//! inserting the new block and moving focus is the host's job.

use crate::caret::CaretPosition;
use crate::engine::EditOutcome;
use crate::types::Segment;
use crate::view::SegmentView;

/// Apply a forced split at the caret's node.
///
/// * Fewer than two word nodes: refused; a segment is never split down to
///   nothing.
/// * The split index is the caret's node, or the one after it when the
///   caret sits at the node's end.
/// * Words `[0, index)` stay (the view re-materializes from them and
///   `was_split` is set); words `[index, ..)` are extracted and handed to
///   the host as the new segment's content.
/// * An index equal to the node count still truncates and sets the flag,
///   but produces no host notification.
pub fn apply(
    segment: &mut Segment,
    view: &mut SegmentView,
    node_index: usize,
    at_end: bool,
) -> EditOutcome {
    if view.len() < 2 {
        return EditOutcome::NoOp;
    }

    let index = if at_end { node_index + 1 } else { node_index };
    let index = index.min(view.len());

    let remainder = view.extract_range(index..view.len());
    let kept = view.extract_range(0..index);
    let notify = index != view.len();

    segment.set_words(kept);
    segment.mark_split();
    *view = SegmentView::materialize(segment);

    if notify {
        EditOutcome::SplitRequested { remainder }
    } else {
        let last = view.len() - 1;
        let offset = view.node(last).map(|n| n.end_offset()).unwrap_or(0);
        EditOutcome::Mutated {
            caret: CaretPosition::collapsed(last, offset),
        }
    }
}
