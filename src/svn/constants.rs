//! svn-specific constants
//!
//! Centralized definitions for svn command names, flags, and output markers.

/// svn command binary name
pub const SVN_COMMAND: &str = "svn";

/// svn subcommands
pub mod commands {
    pub const STATUS: &str = "status";
    pub const LOG: &str = "log";
    pub const DIFF: &str = "diff";
    pub const INFO: &str = "info";
    pub const LIST: &str = "list";
}

/// svn command flags
pub mod flags {
    /// Never prompt (global, safe for all commands)
    pub const NON_INTERACTIVE: &str = "--non-interactive";
    /// Structured output
    pub const XML: &str = "--xml";
    /// Verbose output (changed paths for log, details for list)
    pub const VERBOSE: &str = "-v";
    /// Contact the repository for out-of-date information
    pub const SHOW_UPDATES: &str = "-u";
    /// Limit the number of log entries
    pub const LIMIT: &str = "--limit";
}

/// Line prefixes with meaning in text output
pub mod markers {
    /// Trailer line printed by `svn status -u`
    pub const STATUS_AGAINST: &str = "Status against";
    /// Header printed before each external's status block
    pub const EXTERNAL_STATUS: &str = "Performing status on external item";
    /// Changelist group header
    pub const CHANGELIST: &str = "--- Changelist";
    /// Start of the changed-path block in `svn log -v`
    pub const CHANGED_PATHS: &str = "Changed paths:";
    /// svn's own binary marker in `svn diff`
    pub const BINARY_MIME: &str = "Cannot display: file marked as a binary type.";
}

/// Error detection patterns in svn output
pub mod errors {
    /// Error code for "not a working copy"
    pub const NOT_A_WORKING_COPY_CODE: &str = "E155007";
    /// Pattern indicating not a working copy
    pub const NOT_A_WORKING_COPY: &str = "is not a working copy";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_svn_command_name() {
        assert_eq!(SVN_COMMAND, "svn");
    }

    #[test]
    fn test_flags_are_long_or_short_options() {
        for flag in [
            flags::NON_INTERACTIVE,
            flags::XML,
            flags::VERBOSE,
            flags::SHOW_UPDATES,
            flags::LIMIT,
        ] {
            assert!(flag.starts_with('-'), "{flag} is not an option");
        }
    }
}
