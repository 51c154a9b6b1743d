pub mod block;
pub mod caret;
pub mod engine;
pub mod error;
pub mod speaker;
pub mod split;
pub mod text;
pub mod types;
pub mod view;

pub use block::{BlockConfig, SpeechBlock};
pub use caret::{CaretPosition, Selection};
pub use engine::{EditCommand, EditOutcome};
pub use error::Error;
pub use speaker::SpeakerPicker;
pub use types::{LINE_BREAK, PLACEHOLDER, Segment, Word};
pub use view::{SegmentView, WordNode};
