//! Merge error taxonomy
//!
//! Every variant is a terminal contract violation rather than an expected
//! runtime condition: a correctly-driven packer pre-checks conflicts and
//! never merges into a rendered fragment.

/// Errors raised when merging one fragment into another
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MergeError {
    /// The two fragments claim a command from the same mutually-exclusive
    /// group
    #[error("can't merge conflicting fragments (shared: {})", .commands.join(", "))]
    Conflict {
        /// Shared conflicting command identifiers, sorted
        commands: Vec<String>,
    },

    /// The same original fragment would end up in one composite twice
    #[error("fragments already included: {}", .names.join(", "))]
    DuplicateInclude {
        /// Fragment names present on both sides, sorted
        names: Vec<String>,
    },

    /// The receiving fragment has already produced its final text
    #[error("fragment has already been rendered")]
    AlreadyRendered,
}
