#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("no speaker with id {0}")]
    UnknownSpeaker(u64),
}
