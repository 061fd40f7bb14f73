//! Working-copy file state machine
//!
//! A fixed, partial transition table over file states and user actions.
//! [`next_state`] answers "what happens if I do this" and the predicates
//! answer "should this action be offered". Nothing here holds state.

use std::fmt;

use crate::model::StatusCode;

/// State of a working-copy file for action gating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// Versioned and unchanged
    Normal,
    Unversioned,
    Ignored,
    Added,
    Modified,
    Deleted,
    Replaced,
    Conflicted,
    Missing,
    Obstructed,
    Incomplete,
}

impl Status {
    pub const ALL: [Status; 11] = [
        Status::Normal,
        Status::Unversioned,
        Status::Ignored,
        Status::Added,
        Status::Modified,
        Status::Deleted,
        Status::Replaced,
        Status::Conflicted,
        Status::Missing,
        Status::Obstructed,
        Status::Incomplete,
    ];

    /// Map a parsed status code
    ///
    /// Externals are not file states and map to `None`. A merged item is
    /// locally modified.
    pub fn from_code(code: StatusCode) -> Option<Self> {
        let status = match code {
            StatusCode::None => Self::Normal,
            StatusCode::Added => Self::Added,
            StatusCode::Deleted => Self::Deleted,
            StatusCode::Modified | StatusCode::Merged => Self::Modified,
            StatusCode::Replaced => Self::Replaced,
            StatusCode::Conflicted => Self::Conflicted,
            StatusCode::Ignored => Self::Ignored,
            StatusCode::Unversioned => Self::Unversioned,
            StatusCode::Missing => Self::Missing,
            StatusCode::Obstructed => Self::Obstructed,
            StatusCode::Incomplete => Self::Incomplete,
            StatusCode::External => return None,
        };
        Some(status)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Unversioned => "unversioned",
            Self::Ignored => "ignored",
            Self::Added => "added",
            Self::Modified => "modified",
            Self::Deleted => "deleted",
            Self::Replaced => "replaced",
            Self::Conflicted => "conflicted",
            Self::Missing => "missing",
            Self::Obstructed => "obstructed",
            Self::Incomplete => "incomplete",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// User-level operation on a working-copy file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Add,
    Delete,
    Revert,
    Commit,
    Update,
    /// Edit the file contents locally
    Modify,
    /// Delete and re-add in one commit
    Replace,
    /// Resolve a conflict by choosing content
    Resolve,
    /// Accept the current working file as resolved
    MarkResolved,
    Ignore,
    Unignore,
}

impl Action {
    pub const ALL: [Action; 11] = [
        Action::Add,
        Action::Delete,
        Action::Revert,
        Action::Commit,
        Action::Update,
        Action::Modify,
        Action::Replace,
        Action::Resolve,
        Action::MarkResolved,
        Action::Ignore,
        Action::Unignore,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Delete => "delete",
            Self::Revert => "revert",
            Self::Commit => "commit",
            Self::Update => "update",
            Self::Modify => "modify",
            Self::Replace => "replace",
            Self::Resolve => "resolve",
            Self::MarkResolved => "mark resolved",
            Self::Ignore => "ignore",
            Self::Unignore => "unignore",
        }
    }

    fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Set of actions, stored as a bit mask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ActionSet(u16);

impl ActionSet {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn insert(&mut self, action: Action) {
        self.0 |= action.bit();
    }

    pub fn contains(self, action: Action) -> bool {
        self.0 & action.bit() != 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Actions in the set, in [`Action::ALL`] order
    pub fn iter(self) -> impl Iterator<Item = Action> {
        Action::ALL.into_iter().filter(move |a| self.contains(*a))
    }
}

impl FromIterator<Action> for ActionSet {
    fn from_iter<I: IntoIterator<Item = Action>>(iter: I) -> Self {
        let mut set = Self::empty();
        for action in iter {
            set.insert(action);
        }
        set
    }
}

/// State reached by applying `action` in state `current`
///
/// Returns `None` when the action is not legal in that state.
pub fn next_state(current: Status, action: Action) -> Option<Status> {
    use Action as A;
    use Status as S;

    let next = match (current, action) {
        (S::Unversioned, A::Add) => S::Added,
        (S::Unversioned, A::Ignore) => S::Ignored,

        (S::Ignored, A::Add) => S::Added,
        (S::Ignored, A::Unignore) => S::Unversioned,

        (S::Normal, A::Modify) => S::Modified,
        (S::Normal, A::Delete) => S::Deleted,
        (S::Normal, A::Replace) => S::Replaced,
        (S::Normal, A::Update) => S::Normal,

        (S::Added, A::Commit) => S::Normal,
        (S::Added, A::Revert) => S::Unversioned,
        (S::Added, A::Modify) => S::Added,
        (S::Added, A::Delete) => S::Unversioned,

        (S::Modified, A::Commit) => S::Normal,
        (S::Modified, A::Revert) => S::Normal,
        (S::Modified, A::Modify) => S::Modified,
        (S::Modified, A::Update) => S::Modified,
        (S::Modified, A::Delete) => S::Deleted,

        // A committed deletion leaves an untracked (or no) file behind
        (S::Deleted, A::Commit) => S::Unversioned,
        (S::Deleted, A::Revert) => S::Normal,
        (S::Deleted, A::Add) => S::Replaced,

        (S::Replaced, A::Commit) => S::Normal,
        (S::Replaced, A::Revert) => S::Normal,
        (S::Replaced, A::Modify) => S::Replaced,

        (S::Conflicted, A::Resolve) => S::Modified,
        (S::Conflicted, A::MarkResolved) => S::Modified,
        (S::Conflicted, A::Revert) => S::Normal,
        (S::Conflicted, A::Delete) => S::Deleted,

        (S::Missing, A::Update) => S::Normal,
        (S::Missing, A::Revert) => S::Normal,
        (S::Missing, A::Delete) => S::Deleted,

        (S::Obstructed, A::Revert) => S::Normal,
        (S::Obstructed, A::Delete) => S::Deleted,

        (S::Incomplete, A::Update) => S::Normal,
        (S::Incomplete, A::Revert) => S::Normal,

        _ => return None,
    };
    Some(next)
}

pub fn is_valid_transition(current: Status, action: Action) -> bool {
    next_state(current, action).is_some()
}

/// Every action legal in `current`
pub fn valid_actions(current: Status) -> ActionSet {
    Action::ALL
        .into_iter()
        .filter(|a| is_valid_transition(current, *a))
        .collect()
}

/// The action a UI should suggest first, if any
pub fn recommended_action(current: Status) -> Option<Action> {
    match current {
        Status::Unversioned => Some(Action::Add),
        Status::Added | Status::Modified | Status::Deleted | Status::Replaced => {
            Some(Action::Commit)
        }
        Status::Conflicted => Some(Action::Resolve),
        Status::Missing | Status::Incomplete => Some(Action::Update),
        Status::Obstructed => Some(Action::Revert),
        Status::Normal | Status::Ignored => None,
    }
}

pub fn can_delete(status: Status) -> bool {
    is_valid_transition(status, Action::Delete)
}

pub fn can_revert(status: Status) -> bool {
    is_valid_transition(status, Action::Revert)
}

/// Whether a commit should be offered
///
/// Conflicted files are never committable, even though they have other
/// outgoing transitions.
pub fn can_commit(status: Status) -> bool {
    matches!(
        status,
        Status::Added | Status::Modified | Status::Deleted | Status::Replaced
    )
}

/// Whether the working copy differs from its base for this file
pub fn has_local_modifications(status: Status) -> bool {
    matches!(
        status,
        Status::Added
            | Status::Modified
            | Status::Deleted
            | Status::Replaced
            | Status::Conflicted
            | Status::Missing
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_transitions() {
        assert_eq!(next_state(Status::Modified, Action::Commit), Some(Status::Normal));
        assert_eq!(next_state(Status::Added, Action::Commit), Some(Status::Normal));
        assert_eq!(next_state(Status::Normal, Action::Commit), None);
    }

    #[test]
    fn test_valid_transition_matches_next_state() {
        for status in Status::ALL {
            for action in Action::ALL {
                assert_eq!(
                    is_valid_transition(status, action),
                    next_state(status, action).is_some(),
                    "{status} / {action}"
                );
            }
        }
    }

    #[test]
    fn test_valid_actions_matches_table() {
        for status in Status::ALL {
            let set = valid_actions(status);
            for action in Action::ALL {
                assert_eq!(set.contains(action), is_valid_transition(status, action));
            }
            assert_eq!(set.len(), set.iter().count());
        }
    }

    #[test]
    fn test_every_status_has_an_outgoing_transition() {
        for status in Status::ALL {
            assert!(!valid_actions(status).is_empty(), "{status} is a dead end");
        }
    }

    #[test]
    fn test_conflicted_cannot_commit() {
        assert!(!can_commit(Status::Conflicted));
        assert!(is_valid_transition(Status::Conflicted, Action::Resolve));
        assert!(is_valid_transition(Status::Conflicted, Action::Revert));
        assert!(is_valid_transition(Status::Conflicted, Action::Delete));
        assert!(has_local_modifications(Status::Conflicted));
    }

    #[test]
    fn test_can_commit_implies_commit_transition() {
        for status in Status::ALL.into_iter().filter(|s| can_commit(*s)) {
            assert!(is_valid_transition(status, Action::Commit), "{status}");
            assert!(has_local_modifications(status), "{status}");
        }
    }

    #[test]
    fn test_recommended_action_is_legal() {
        for status in Status::ALL {
            if let Some(action) = recommended_action(status) {
                assert!(is_valid_transition(status, action), "{status} -> {action}");
            }
        }
    }

    #[test]
    fn test_delete_and_revert_predicates() {
        assert!(can_delete(Status::Normal));
        assert!(!can_delete(Status::Unversioned));
        assert!(can_revert(Status::Modified));
        assert!(!can_revert(Status::Normal));
        assert!(!can_revert(Status::Ignored));
    }

    #[test]
    fn test_add_then_revert_round_trip() {
        let added = next_state(Status::Unversioned, Action::Add);
        assert_eq!(added, Some(Status::Added));
        assert_eq!(
            added.and_then(|s| next_state(s, Action::Revert)),
            Some(Status::Unversioned)
        );
    }

    #[test]
    fn test_from_code() {
        assert_eq!(Status::from_code(StatusCode::None), Some(Status::Normal));
        assert_eq!(Status::from_code(StatusCode::Merged), Some(Status::Modified));
        assert_eq!(Status::from_code(StatusCode::External), None);
        for status in Status::ALL {
            let code = StatusCode::from_word(status.label());
            assert_eq!(Status::from_code(code), Some(status));
        }
    }

    #[test]
    fn test_action_set_basics() {
        let mut set = ActionSet::empty();
        assert!(set.is_empty());
        set.insert(Action::Commit);
        set.insert(Action::Commit);
        set.insert(Action::Add);
        assert_eq!(set.len(), 2);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![Action::Add, Action::Commit]);
    }
}
