//! Headless speaker picker: the popover's behavior without its chrome.
//!
//! The host renders the list and reports the clicked entry as a serialized
//! payload; the picker validates it against the configured speaker list and
//! surfaces the change as a value. The core never holds host callbacks.

use segment_interface::{SpeakerData, SpeakerRef};

use crate::Segment;
use crate::error::Error;

/// Parse the serialized speaker payload the host attaches to a list entry.
pub fn parse_speaker_payload(payload: &str) -> Result<SpeakerRef, Error> {
    Ok(serde_json::from_str(payload)?)
}

/// Selection state for the speaker popover.
///
/// An empty speaker list is the "not found" state: the picker stays usable
/// but can never produce a change.
#[derive(Debug, Clone)]
pub struct SpeakerPicker {
    speakers: Vec<SpeakerRef>,
    selected: Option<usize>,
    open: bool,
}

impl SpeakerPicker {
    pub fn new(speakers: Vec<SpeakerRef>) -> Self {
        Self {
            speakers,
            selected: None,
            open: false,
        }
    }

    pub fn speakers(&self) -> &[SpeakerRef] {
        &self.speakers
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// The highlighted entry, if the open segment's speaker is in the list.
    pub fn selected(&self) -> Option<&SpeakerRef> {
        self.selected.map(|i| &self.speakers[i])
    }

    /// Open for a segment, highlighting its current speaker. Segments that
    /// still carry a legacy plain-name speaker highlight nothing.
    pub fn open(&mut self, segment: &Segment) {
        self.selected = match &segment.speaker {
            SpeakerData::Ref(current) => {
                self.speakers.iter().position(|s| s.id == current.id)
            }
            SpeakerData::Name(_) => None,
        };
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
        self.selected = None;
    }

    /// Resolve a clicked entry against the configured list.
    pub fn resolve(&self, payload: &str) -> Result<SpeakerRef, Error> {
        let picked = parse_speaker_payload(payload)?;
        self.speakers
            .iter()
            .find(|s| s.id == picked.id)
            .cloned()
            .ok_or(Error::UnknownSpeaker(picked.id))
    }

    /// Resolve a clicked entry and close on success. Malformed payloads and
    /// speakers missing from the list are logged and treated as "no speaker
    /// found"; the pick is aborted and nothing changes.
    pub fn pick(&mut self, payload: &str) -> Option<SpeakerRef> {
        match self.resolve(payload) {
            Ok(speaker) => {
                self.close();
                Some(speaker)
            }
            Err(err) => {
                tracing::warn!(%err, "ignoring speaker pick");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use segment_interface::SegmentData;

    fn speaker(id: u64, name: &str) -> SpeakerRef {
        SpeakerRef {
            id,
            name: name.into(),
            icon: None,
        }
    }

    fn segment_with_speaker(speaker: SpeakerData) -> Segment {
        Segment::from_data(SegmentData {
            speaker,
            ..SegmentData::default()
        })
    }

    #[test]
    fn open_highlights_current_speaker() {
        let mut picker = SpeakerPicker::new(vec![speaker(1, "Alice"), speaker(2, "Bob")]);
        let segment = segment_with_speaker(SpeakerData::Ref(speaker(2, "Bob")));

        picker.open(&segment);

        assert!(picker.is_open());
        assert_eq!(picker.selected().map(|s| s.id), Some(2));
    }

    #[test]
    fn open_with_legacy_name_speaker_highlights_nothing() {
        let mut picker = SpeakerPicker::new(vec![speaker(1, "Alice")]);
        let segment = segment_with_speaker(SpeakerData::Name("Someone".into()));

        picker.open(&segment);

        assert!(picker.is_open());
        assert!(picker.selected().is_none());
    }

    #[test]
    fn pick_resolves_against_list_and_closes() {
        let mut picker = SpeakerPicker::new(vec![speaker(1, "Alice")]);
        picker.open(&Segment::default());

        let picked = picker.pick(r#"{"id": 1, "name": "Alice", "icon": null}"#);

        assert_eq!(picked.map(|s| s.name), Some("Alice".into()));
        assert!(!picker.is_open());
    }

    #[test]
    fn malformed_payload_is_tolerated() {
        let mut picker = SpeakerPicker::new(vec![speaker(1, "Alice")]);
        picker.open(&Segment::default());

        assert!(picker.pick("{not json").is_none());
        assert!(picker.is_open());
    }

    #[test]
    fn unknown_speaker_is_tolerated() {
        let mut picker = SpeakerPicker::new(vec![speaker(1, "Alice")]);

        assert!(
            picker
                .pick(r#"{"id": 99, "name": "Ghost", "icon": null}"#)
                .is_none()
        );
    }

    #[test]
    fn resolve_reports_unknown_speaker() {
        let picker = SpeakerPicker::new(vec![speaker(1, "Alice")]);

        let err = picker
            .resolve(r#"{"id": 9, "name": "Ghost", "icon": null}"#)
            .unwrap_err();

        assert!(matches!(err, Error::UnknownSpeaker(9)));
    }

    #[test]
    fn empty_list_never_resolves() {
        let mut picker = SpeakerPicker::new(Vec::new());
        assert!(picker.speakers().is_empty());
        assert!(
            picker
                .pick(r#"{"id": 1, "name": "Alice", "icon": null}"#)
                .is_none()
        );
    }
}
