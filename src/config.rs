//! Runtime configuration
//!
//! Values come from command-line flags (with environment fallbacks) in the
//! binary. Nothing is persisted.

use std::path::PathBuf;

use crate::svn::SvnExecutor;
use crate::svn::constants::SVN_COMMAND;

/// Settings shared by every svn invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// svn binary to run
    pub svn_command: String,
    /// Working copy to run in (None = current directory)
    pub working_copy: Option<PathBuf>,
    /// Request `--xml` output instead of plain text
    pub structured: bool,
    /// Maximum number of log entries to fetch
    pub log_limit: Option<u32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            svn_command: SVN_COMMAND.to_string(),
            working_copy: None,
            structured: true,
            log_limit: None,
        }
    }
}

impl Config {
    /// Build an executor for these settings
    pub fn executor(&self) -> SvnExecutor {
        let executor = match &self.working_copy {
            Some(path) => SvnExecutor::with_working_copy(path.clone()),
            None => SvnExecutor::new(),
        };
        executor.with_program(self.svn_command.as_str())
    }

    /// Directory status paths are relative to
    pub fn root(&self) -> PathBuf {
        self.working_copy.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.svn_command, "svn");
        assert!(config.working_copy.is_none());
        assert!(config.structured);
        assert_eq!(config.log_limit, None);
        assert_eq!(config.root(), PathBuf::from("."));
    }

    #[test]
    fn test_executor_uses_working_copy() {
        let config = Config {
            working_copy: Some(PathBuf::from("/srv/wc")),
            ..Config::default()
        };
        let executor = config.executor();
        assert_eq!(executor.working_copy(), Some(&PathBuf::from("/srv/wc")));
        assert_eq!(config.root(), PathBuf::from("/srv/wc"));
    }
}
