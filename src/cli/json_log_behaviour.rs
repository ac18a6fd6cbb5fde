use crate::logging::default_json_log_path;
use std::borrow::Cow;
use std::path::Path;
use std::path::PathBuf;

/// Whether diagnostics are also written as JSON lines, and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JsonLogBehaviour {
    None,
    /// Write to a timestamped file in the working directory.
    SomeAutomaticPath,
    Some(PathBuf),
}

impl JsonLogBehaviour {
    #[must_use]
    pub fn get_path(&self) -> Option<Cow<'_, Path>> {
        match self {
            JsonLogBehaviour::None => None,
            JsonLogBehaviour::SomeAutomaticPath => Some(Cow::Owned(default_json_log_path())),
            JsonLogBehaviour::Some(path) => Some(Cow::Borrowed(path.as_path())),
        }
    }
}
