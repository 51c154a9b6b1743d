//! Static block metadata the host inspects at tool registration.

/// Toolbox entry: icon markup plus the display title.
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct Toolbox {
    pub icon: &'static str,
    pub title: &'static str,
}

/// Per-field markup rules applied by the host's sanitizer on save.
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct SanitizeRules {
    pub id: bool,
    pub timestamp: bool,
    pub speaker: bool,
    #[serde(rename = "wasSplit")]
    pub was_split: bool,
    pub text: TextRules,
}

/// Markup allowed inside the `text` field. Only `<br>` is ever whitelisted;
/// it is how line-break pseudo-words survive sanitization.
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct TextRules {
    pub br: bool,
}

/// Everything the host needs to register the speech tool.
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct BlockMeta {
    pub is_read_only_supported: bool,
    pub enable_line_breaks: bool,
    pub toolbox: Toolbox,
    pub sanitize: SanitizeRules,
}

const TOOLBOX_ICON: &str = r#"<svg width="17" height="15" viewBox="0 0 17 15" xmlns="http://www.w3.org/2000/svg"><path d="M2 1h13v9H6l-4 4V1z"/></svg>"#;

impl BlockMeta {
    /// The speech tool's registration metadata.
    ///
    /// `enable_line_breaks` stays off: the edit engine owns Enter, so the
    /// host's native line-break handling must never run inside a segment.
    pub const SPEECH: Self = Self {
        is_read_only_supported: true,
        enable_line_breaks: false,
        toolbox: Toolbox {
            icon: TOOLBOX_ICON,
            title: "Speech",
        },
        sanitize: SanitizeRules {
            id: false,
            timestamp: false,
            speaker: false,
            was_split: false,
            text: TextRules { br: true },
        },
    };
}
