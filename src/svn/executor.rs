//! svn command executor
//!
//! Handles running svn commands and capturing their output.

use std::path::PathBuf;
use std::process::Command;

use super::SvnError;
use super::constants::{self, commands, errors, flags};

/// Captured result of one svn invocation
///
/// The exit code is reported as-is; deciding what counts as success is
/// up to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutput {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Executor for svn commands
#[derive(Debug, Clone)]
pub struct SvnExecutor {
    /// Binary to run
    program: String,
    /// Working copy to run in (None = current directory)
    working_copy: Option<PathBuf>,
}

impl Default for SvnExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl SvnExecutor {
    /// Create a new executor for the current directory
    pub fn new() -> Self {
        Self {
            program: constants::SVN_COMMAND.to_string(),
            working_copy: None,
        }
    }

    /// Create a new executor for a specific working copy
    pub fn with_working_copy(path: PathBuf) -> Self {
        Self {
            working_copy: Some(path),
            ..Self::new()
        }
    }

    /// Use a different svn binary
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn working_copy(&self) -> Option<&PathBuf> {
        self.working_copy.as_ref()
    }

    /// Run an svn command and capture its output
    ///
    /// Automatically adds `--non-interactive`. Only a failure to spawn the
    /// process is an error; a non-zero exit code is returned in the output.
    pub fn run(&self, args: &[&str]) -> Result<CommandOutput, SvnError> {
        let mut cmd = Command::new(&self.program);

        if let Some(ref path) = self.working_copy {
            cmd.current_dir(path);
        }

        cmd.args(args).arg(flags::NON_INTERACTIVE);
        tracing::debug!(program = %self.program, ?args, "running svn");

        let output = cmd.output().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                SvnError::SvnNotFound
            } else {
                SvnError::IoError(e)
            }
        })?;

        Ok(CommandOutput {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    /// Run an svn command, treating a non-zero exit code as an error
    pub fn run_checked(&self, args: &[&str]) -> Result<String, SvnError> {
        let output = self.run(args)?;
        if output.success() {
            return Ok(output.stdout);
        }

        tracing::debug!(exit_code = output.exit_code, stderr = %output.stderr, "svn failed");
        if is_not_a_working_copy(&output.stderr) {
            return Err(SvnError::NotAWorkingCopy);
        }

        Err(SvnError::CommandFailed {
            stderr: output.stderr,
            exit_code: output.exit_code,
        })
    }

    /// Run `svn status`
    pub fn status_raw(&self, structured: bool, show_updates: bool) -> Result<String, SvnError> {
        let mut args = vec![commands::STATUS];
        if show_updates {
            args.push(flags::SHOW_UPDATES);
        }
        if structured {
            args.push(flags::XML);
        }
        self.run_checked(&args)
    }

    /// Run `svn log -v` with an optional target and entry limit
    pub fn log_raw(
        &self,
        target: Option<&str>,
        limit: Option<u32>,
        structured: bool,
    ) -> Result<String, SvnError> {
        let limit = limit.map(|n| n.to_string());
        let mut args = vec![commands::LOG, flags::VERBOSE];
        if let Some(ref n) = limit {
            args.push(flags::LIMIT);
            args.push(n.as_str());
        }
        if structured {
            args.push(flags::XML);
        }
        args.extend(target);
        self.run_checked(&args)
    }

    /// Run `svn diff`
    pub fn diff_raw(&self, target: Option<&str>) -> Result<String, SvnError> {
        let mut args = vec![commands::DIFF];
        args.extend(target);
        self.run_checked(&args)
    }

    /// Run `svn info`
    pub fn info_raw(&self, target: Option<&str>, structured: bool) -> Result<String, SvnError> {
        let mut args = vec![commands::INFO];
        if structured {
            args.push(flags::XML);
        }
        args.extend(target);
        self.run_checked(&args)
    }

    /// Run `svn list -v`
    pub fn list_raw(&self, target: Option<&str>, structured: bool) -> Result<String, SvnError> {
        let mut args = vec![commands::LIST, flags::VERBOSE];
        if structured {
            args.push(flags::XML);
        }
        args.extend(target);
        self.run_checked(&args)
    }
}

fn is_not_a_working_copy(stderr: &str) -> bool {
    stderr.contains(errors::NOT_A_WORKING_COPY_CODE) || stderr.contains(errors::NOT_A_WORKING_COPY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_executor_default() {
        let executor = SvnExecutor::default();
        assert!(executor.working_copy.is_none());
        assert_eq!(executor.program, "svn");
    }

    #[test]
    fn test_executor_with_path() {
        let executor = SvnExecutor::with_working_copy(PathBuf::from("/tmp/wc"));
        assert_eq!(executor.working_copy(), Some(&PathBuf::from("/tmp/wc")));
    }

    #[test]
    fn test_executor_with_program() {
        let executor = SvnExecutor::new().with_program("/opt/svn/bin/svn");
        assert_eq!(executor.program, "/opt/svn/bin/svn");
    }

    #[test]
    fn test_missing_binary_is_reported() {
        let executor = SvnExecutor::new().with_program("svnlens-definitely-not-installed");
        let result = executor.run(&["status"]);
        assert!(matches!(result, Err(SvnError::SvnNotFound)));
    }

    #[test]
    fn test_not_a_working_copy_detection() {
        assert!(is_not_a_working_copy(
            "svn: E155007: '/tmp/x' is not a working copy"
        ));
        assert!(!is_not_a_working_copy("svn: E170013: Unable to connect"));
    }

    #[test]
    fn test_command_output_success() {
        let ok = CommandOutput::default();
        assert!(ok.success());
        let failed = CommandOutput {
            exit_code: 1,
            ..Default::default()
        };
        assert!(!failed.success());
    }
}
