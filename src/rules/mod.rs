//! Mutually-exclusive command groups
//!
//! The sole conflict policy: static groups of kickstart commands of which
//! at most one member may appear in a composite. Pure and stateless.

/// Installation-interface commands; exactly one may appear
const INTERFACE: &[&str] = &["cmdline", "graphical", "text", "vnc"];

/// Partitioning-strategy commands; exactly one may appear
const PARTITIONING: &[&str] = &["autopart", "logvol", "part", "raid", "volgroup"];

const GROUPS: &[&[&str]] = &[INTERFACE, PARTITIONING];

/// Look up the mutually-exclusive group a command belongs to.
///
/// Returns `None` when the command is in no group, meaning it conflicts
/// only with itself; callers then treat the command as its own singleton
/// group.
pub fn mutually_exclusive(command: &str) -> Option<&'static [&'static str]> {
    GROUPS.iter().copied().find(|group| group.contains(&command))
}
