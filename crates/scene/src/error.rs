use thiserror::Error;

/// Failures surfaced by scene document load/save.
///
/// Partial documents are not an error (missing keys fall back to defaults);
/// only unreadable or structurally unparseable input ends up here.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("failed to read scene document: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed scene document: {0}")]
    Parse(#[from] serde_json::Error),
}
