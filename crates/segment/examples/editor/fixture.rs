use segment_interface::SegmentData;

#[derive(Clone, clap::ValueEnum, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum Fixture {
    #[strum(serialize = "standup")]
    #[value(name = "standup")]
    Standup,
    #[strum(serialize = "interview")]
    #[value(name = "interview")]
    Interview,
}

impl Fixture {
    pub fn json(&self) -> &'static str {
        match self {
            Self::Standup => STANDUP_JSON,
            Self::Interview => INTERVIEW_JSON,
        }
    }

    pub fn segments(&self) -> Vec<SegmentData> {
        serde_json::from_str(self.json()).expect("fixture must parse as SegmentData[]")
    }
}

const STANDUP_JSON: &str = r#"[
  {
    "id": 1,
    "speaker": {"id": 1, "name": "Alice", "icon": null},
    "timestamp": 0.0,
    "wasSplit": false,
    "text": [
      {"word": "Yesterday", "start": 0.2, "end": 0.8},
      {"word": "I", "start": 0.9, "end": 1.0},
      {"word": "finished", "start": 1.0, "end": 1.5},
      {"word": "the", "start": 1.5, "end": 1.6},
      {"word": "caret", "start": 1.6, "end": 2.0},
      {"word": "adapter", "start": 2.0, "end": 2.6}
    ]
  },
  {
    "id": 2,
    "speaker": {"id": 2, "name": "Bob", "icon": null},
    "timestamp": 3.1,
    "wasSplit": false,
    "text": [
      {"word": "Nice,", "start": 3.2, "end": 3.6},
      {"word": "I'm", "start": 3.7, "end": 3.9},
      {"word": "still", "start": 3.9, "end": 4.2},
      {"word": "on", "start": 4.2, "end": 4.4},
      {"word": "the", "start": 4.4, "end": 4.5},
      {"word": "split", "start": 4.5, "end": 4.9},
      {"word": "engine", "start": 4.9, "end": 5.4}
    ]
  },
  {
    "id": 3,
    "speaker": "Unknown Speaker",
    "timestamp": 6.0,
    "wasSplit": false,
    "text": []
  }
]"#;

const INTERVIEW_JSON: &str = r#"[
  {
    "id": 10,
    "speaker": {"id": 1, "name": "Host", "icon": null},
    "timestamp": 0.0,
    "wasSplit": false,
    "text": [
      {"word": "So", "start": 0.1, "end": 0.3},
      {"word": "tell", "start": 0.3, "end": 0.6},
      {"word": "us", "start": 0.6, "end": 0.8},
      {"word": "about", "start": 0.8, "end": 1.1},
      {"word": "the", "start": 1.1, "end": 1.2},
      {"word": "alignment", "start": 1.2, "end": 1.8},
      {"word": "engine", "start": 1.8, "end": 2.3}
    ]
  },
  {
    "id": 11,
    "speaker": {"id": 2, "name": "Guest", "icon": null},
    "timestamp": 3.0,
    "wasSplit": true,
    "text": [
      {"word": "Every", "start": 3.1, "end": 3.4},
      {"word": "word", "start": 3.4, "end": 3.7},
      {"word": "keeps", "start": 3.7, "end": 4.0},
      {"word": "its", "start": 4.0, "end": 4.2},
      {"word": "own", "start": 4.2, "end": 4.4},
      {"word": "timestamps,", "start": 4.4, "end": 5.0},
      {"word": "even", "start": 5.1, "end": 5.4},
      {"word": "through", "start": 5.4, "end": 5.8},
      {"word": "edits", "start": 5.8, "end": 6.3}
    ]
  }
]"#;
