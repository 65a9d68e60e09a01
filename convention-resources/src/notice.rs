//! Notices emitted while aggregating, and the sinks that receive them.
//!
//! Notices are informational only and never influence control flow.

use std::fmt;
use std::path::PathBuf;
use std::sync::Mutex;

/// Something worth telling the user about during aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// A resource definition contributes a top-level key that already exists.
    DuplicateDefinition { key: String, path: PathBuf },
    /// A resource definition file is being merged into the aggregate.
    IncludingDefinition { path: PathBuf },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::DuplicateDefinition { key, .. } => write!(
                f,
                "WARNING: Resource {} has multiple definitions. They will be merged.",
                key
            ),
            Notice::IncludingDefinition { path } => {
                write!(f, "Including resource definition: {}", path.display())
            }
        }
    }
}

/// Receiver for aggregation notices.
pub trait NoticeSink {
    fn notice(&self, notice: &Notice);
}

impl<S: NoticeSink + ?Sized> NoticeSink for &S {
    fn notice(&self, notice: &Notice) {
        (**self).notice(notice)
    }
}

/// Forwards notices to `tracing`: duplicates at `warn`, inclusions at `info`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl NoticeSink for TracingSink {
    fn notice(&self, notice: &Notice) {
        match notice {
            Notice::DuplicateDefinition { key, path } => {
                tracing::warn!(key = %key, path = %path.display(), "{}", notice)
            }
            Notice::IncludingDefinition { path } => {
                tracing::info!(path = %path.display(), "{}", notice)
            }
        }
    }
}

/// Records every notice it receives.
#[derive(Debug, Default)]
pub struct CapturingSink {
    notices: Mutex<Vec<Notice>>,
}

impl CapturingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All notices received so far, in order.
    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .map(|notices| notices.clone())
            .unwrap_or_default()
    }

    /// Rendered messages, in order.
    pub fn messages(&self) -> Vec<String> {
        self.notices().iter().map(ToString::to_string).collect()
    }

    /// Keys named by duplicate-definition notices, in order.
    pub fn duplicate_keys(&self) -> Vec<String> {
        self.notices()
            .into_iter()
            .filter_map(|notice| match notice {
                Notice::DuplicateDefinition { key, .. } => Some(key),
                Notice::IncludingDefinition { .. } => None,
            })
            .collect()
    }
}

impl NoticeSink for CapturingSink {
    fn notice(&self, notice: &Notice) {
        if let Ok(mut notices) = self.notices.lock() {
            notices.push(notice.clone());
        }
    }
}
