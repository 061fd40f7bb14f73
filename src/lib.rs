//! svnlens - typed views over Subversion output
//!
//! The UI-independent core of a Subversion client.
//!
//! This library provides:
//! - [`config`]: Runtime settings
//! - [`model`]: Domain models
//! - [`state`]: Working-copy file state machine
//! - [`svn`]: svn command execution and parsing
//! - [`tree`]: Status tree builder

pub mod config;
pub mod model;
pub mod state;
pub mod svn;
pub mod tree;
