use std::fmt;
use std::path::Path;

use gridcalc_eval::EvalConfig;

use crate::error::{Result, WorkbookError};

/// How file names are checked before loading or saving.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExtensionPolicy {
    /// The extension must be exactly `txt`.
    #[default]
    Strict,
    /// Only the last three characters must be `txt`, so `notes.atxt` or a
    /// bare `txt` pass.
    Legacy,
}

impl ExtensionPolicy {
    pub fn accepts(self, path: &Path) -> bool {
        match self {
            ExtensionPolicy::Strict => path.extension().is_some_and(|ext| ext == "txt"),
            ExtensionPolicy::Legacy => path.to_string_lossy().ends_with("txt"),
        }
    }

    pub fn check(self, path: &Path) -> Result<()> {
        if self.accepts(path) {
            Ok(())
        } else {
            Err(WorkbookError::InvalidExtension {
                path: path.to_path_buf(),
                policy: self,
            })
        }
    }
}

impl fmt::Display for ExtensionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ExtensionPolicy::Strict => "strict",
            ExtensionPolicy::Legacy => "legacy",
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WorkbookConfig {
    pub extension_policy: ExtensionPolicy,
    pub eval: EvalConfig,
}

impl WorkbookConfig {
    pub fn with_extension_policy(mut self, policy: ExtensionPolicy) -> Self {
        self.extension_policy = policy;
        self
    }

    pub fn with_eval(mut self, eval: EvalConfig) -> Self {
        self.eval = eval;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.eval = self.eval.with_max_depth(max_depth);
        self
    }
}
