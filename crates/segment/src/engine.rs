//! The edit operation engine: one keyboard command in, one outcome out.
//!
//! There is no persisted mode: every decision derives from the caret
//! position at the moment the command arrives. The engine and the view
//! synchronizer are the only writers of the node sequence and the word
//! list.
//!
//! Suppression contract: every outcome except [`EditOutcome::PassThrough`]
//! means the host must cancel the native key behavior. Plain typing and
//! arrow keys are never routed here.

use segment_interface::SpeakerRef;

use crate::caret::CaretPosition;
use crate::split;
use crate::text::{char_len, normalize};
use crate::types::{LINE_BREAK, Segment, Word};
use crate::view::{SegmentView, WordNode};

/// Intercepted keyboard commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditCommand {
    /// Enter; `split_segment` is set when the platform modifier was held.
    Enter { split_segment: bool },
    Backspace,
    Delete,
    Whitespace,
    /// Modifier + A.
    SelectAll,
}

/// What a command did, surfaced to the host as a value (and to the host
/// frontend as a tagged event).
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum EditOutcome {
    /// Precondition not met in a way the native editor handles fine
    /// (deleting inside a word, typing a trailing space): do not suppress.
    PassThrough,
    /// Refused: nothing changed, but the key event must be suppressed so
    /// the caret cannot escape the segment.
    NoOp,
    /// The node sequence changed; place the caret here.
    Mutated { caret: CaretPosition },
    /// Host should select the segment's full text container.
    SelectAllRequested,
    /// The segment was divided: `remainder` belongs to a new segment the
    /// host creates after this block. Emitted at most once per command.
    SplitRequested { remainder: Vec<Word> },
    /// The user picked a different speaker in the popover.
    SpeakerChangeRequested { speaker: SpeakerRef },
}

impl EditOutcome {
    /// Whether the host must `preventDefault` the originating key event.
    pub fn suppresses_default(&self) -> bool {
        !matches!(self, Self::PassThrough)
    }
}

/// Handle one command against the live view. `segment` is only written by
/// the segment-split path (truncation + `was_split`).
pub fn handle(
    segment: &mut Segment,
    view: &mut SegmentView,
    caret: &CaretPosition,
    command: EditCommand,
) -> EditOutcome {
    match command {
        EditCommand::Enter { split_segment } => enter(segment, view, caret, split_segment),
        EditCommand::Backspace => backspace(view, caret),
        EditCommand::Delete => delete(view, caret),
        EditCommand::Whitespace => whitespace(view, caret),
        EditCommand::SelectAll => EditOutcome::SelectAllRequested,
    }
}

fn enter(
    segment: &mut Segment,
    view: &mut SegmentView,
    caret: &CaretPosition,
    split_segment: bool,
) -> EditOutcome {
    let Some(index) = caret.node else {
        return EditOutcome::NoOp;
    };
    let Some(node) = view.node(index) else {
        return EditOutcome::NoOp;
    };

    let at_end = caret.offset == node.end_offset();

    if split_segment {
        return split::apply(segment, view, index, at_end);
    }

    // Line break inherits the current node's timing: it has no independent
    // timing source of its own.
    let line_break = WordNode::synthesized(LINE_BREAK, node.start(), node.end());

    if at_end {
        view.insert_node(index + 1, line_break);
        EditOutcome::Mutated {
            caret: CaretPosition::collapsed(index, caret.offset),
        }
    } else {
        view.insert_node(index, line_break);
        EditOutcome::Mutated {
            caret: CaretPosition::collapsed(index + 1, caret.offset),
        }
    }
}

fn backspace(view: &mut SegmentView, caret: &CaretPosition) -> EditOutcome {
    let Some(index) = caret.node else {
        return EditOutcome::NoOp;
    };
    if view.is_empty() {
        return EditOutcome::NoOp;
    }

    if caret.offset != 0 || !caret.is_collapsed {
        return EditOutcome::PassThrough;
    }
    if index == 0 {
        // Nothing to merge into.
        return EditOutcome::NoOp;
    }

    match merge_pair(view, index - 1, index) {
        Some(join) => EditOutcome::Mutated {
            caret: CaretPosition::collapsed(index - 1, join),
        },
        None => EditOutcome::NoOp,
    }
}

fn delete(view: &mut SegmentView, caret: &CaretPosition) -> EditOutcome {
    let Some(index) = caret.node else {
        return EditOutcome::NoOp;
    };
    if view.is_empty() {
        return EditOutcome::NoOp;
    }
    let Some(node) = view.node(index) else {
        return EditOutcome::NoOp;
    };

    let at_end = caret.offset == node.end_offset();
    let is_last = index + 1 == view.len();

    if !at_end || is_last {
        return EditOutcome::PassThrough;
    }

    match merge_pair(view, index, index) {
        Some(join) => EditOutcome::Mutated {
            caret: CaretPosition::collapsed(index, join),
        },
        None => EditOutcome::NoOp,
    }
}

fn whitespace(view: &mut SegmentView, caret: &CaretPosition) -> EditOutcome {
    let Some(index) = caret.node else {
        return EditOutcome::NoOp;
    };
    let Some(node) = view.node(index) else {
        return EditOutcome::NoOp;
    };

    if caret.offset >= node.max_offset() {
        // At end of text a space is ordinary typing.
        return EditOutcome::PassThrough;
    }

    let content = node.content().into_owned();
    let (start, end) = (node.start(), node.end());
    let (prefix, suffix) = crate::text::split_at(&content, node.lead() + caret.offset);

    // Both halves inherit the original node's timing.
    let first = WordNode::synthesized(prefix, start, end);
    let second = WordNode::synthesized(suffix, start, end);
    view.replace_with_pair(index, first, second);

    EditOutcome::Mutated {
        caret: CaretPosition::collapsed(index + 1, 0),
    }
}

/// Replace the pair `(first, first + 1)` with one node holding
/// trim(left) + trim(right); timing comes from the node at `timing_source`.
/// Tolerates placeholder text on either side.
fn merge_pair(view: &mut SegmentView, first: usize, timing_source: usize) -> Option<usize> {
    let left_node = view.node(first)?;
    let right_node = view.node(first + 1)?;
    let source = view.node(timing_source)?;

    let left = normalize(&left_node.content(), true);
    let right = normalize(&right_node.content(), true);
    let (start, end) = (source.start(), source.end());
    let join = char_len(&left);

    view.replace_pair(first, WordNode::synthesized(&format!("{left}{right}"), start, end));
    Some(join)
}
