//! Kickstart fragments
//!
//! A [`Fragment`] is one mergeable unit of kickstart text. It owns the
//! split into command lines and block sections, detects semantic conflicts
//! against other fragments, absorbs compatible fragments in place, and
//! renders the final text, injecting mandatory defaults on first render.

mod split;

use std::collections::HashSet;

use crate::error::MergeError;
use crate::mandatory::MandatorySet;
use crate::rules;

/// Name of the synthesized fragment carrying the mandatory defaults
const MANDATORY_NAME: &str = "Mandatory";

/// Render lifecycle of a fragment.
///
/// A single Open -> Rendered transition; once rendered, the fragment is
/// immutable and merges into it fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RenderState {
    Open,
    Rendered,
}

/// One mergeable unit of kickstart configuration text
#[derive(Debug, Clone)]
pub struct Fragment {
    /// Names of the original fragments folded into this one, self first
    included: Vec<String>,
    /// The body as supplied at construction, emitted verbatim when this
    /// fragment never absorbed another
    initial_body: String,
    /// Selects the mandatory-default set applied at render time
    version: Option<String>,
    /// Suppresses provenance comments and blank-line separators
    compact: bool,
    /// Single-line directives plus attached comment lines, in input order
    commands: Vec<String>,
    /// Block sections including their `%` delimiters, in input order
    sections: Vec<String>,
    /// True once at least one other fragment has been absorbed
    changed: bool,
    state: RenderState,
}

impl Fragment {
    /// Create a named fragment from raw kickstart text.
    pub fn new(name: impl Into<String>, body: impl Into<String>) -> Self {
        Self::build(Some(name.into()), body.into(), false)
    }

    /// Create a named fragment that emits no provenance comments and no
    /// blank-line separators between merged parts.
    pub fn compact(name: impl Into<String>, body: impl Into<String>) -> Self {
        Self::build(Some(name.into()), body.into(), true)
    }

    /// Unnamed compact fragment; used for synthesized mandatory bits so
    /// they carry no provenance of their own.
    pub(crate) fn unnamed(body: impl Into<String>) -> Self {
        Self::build(None, body.into(), true)
    }

    fn build(name: Option<String>, body: String, compact: bool) -> Self {
        let (commands, sections) = split::split_body(name.as_deref(), &body, compact);
        Self {
            included: name.into_iter().collect(),
            initial_body: body,
            version: None,
            compact,
            commands,
            sections,
            changed: false,
            state: RenderState::Open,
        }
    }

    /// Select the mandatory-default set applied at render time. Every
    /// version currently maps to the standard set.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Returns the set of command identifiers this fragment claims,
    /// expanded through the mutually-exclusive groups.
    ///
    /// A claim comes from a plain command line (first token), a disabled
    /// `#;` command line (first token after the marker), or a `%packages`
    /// section (the literal identifier `%packages`).
    pub fn conflicting_commands(&self) -> HashSet<String> {
        let mut claimed: Vec<String> = Vec::new();
        for line in &self.commands {
            let trimmed = line.trim_start();
            if trimmed.chars().next().is_some_and(char::is_alphabetic) {
                if let Some(token) = trimmed.split_whitespace().next() {
                    claimed.push(token.to_string());
                }
            } else if let Some(rest) = trimmed.strip_prefix("#;") {
                if let Some(token) = rest.trim_start().split_whitespace().next() {
                    claimed.push(token.to_string());
                }
            }
        }
        if self.has_packages() {
            claimed.push("%packages".to_string());
        }

        let mut expanded = HashSet::new();
        for command in claimed {
            match rules::mutually_exclusive(&command) {
                Some(group) => expanded.extend(group.iter().map(|c| (*c).to_string())),
                None => {
                    expanded.insert(command);
                }
            }
        }
        expanded
    }

    /// True if the two fragments claim a command from the same
    /// mutually-exclusive group.
    pub fn conflicts_with(&self, other: &Fragment) -> bool {
        !self
            .conflicting_commands()
            .is_disjoint(&other.conflicting_commands())
    }

    /// Merge `other` into this fragment in place.
    ///
    /// `other` is left untouched. Commands append after a blank-line
    /// separator (skipped when this fragment is compact); sections likewise.
    ///
    /// # Errors
    /// - [`MergeError::AlreadyRendered`] if this fragment's text is final
    /// - [`MergeError::Conflict`] if the fragments share a conflicting
    ///   command
    /// - [`MergeError::DuplicateInclude`] if any original fragment name is
    ///   present on both sides
    pub fn merge(&mut self, other: &Fragment) -> Result<(), MergeError> {
        if self.state == RenderState::Rendered {
            return Err(MergeError::AlreadyRendered);
        }

        let mut shared: Vec<String> = self
            .conflicting_commands()
            .intersection(&other.conflicting_commands())
            .cloned()
            .collect();
        if !shared.is_empty() {
            shared.sort();
            return Err(MergeError::Conflict { commands: shared });
        }

        let mut duplicated: Vec<String> = self
            .included
            .iter()
            .filter(|name| other.included.contains(name))
            .cloned()
            .collect();
        if !duplicated.is_empty() {
            duplicated.sort();
            return Err(MergeError::DuplicateInclude { names: duplicated });
        }

        if !other.commands.is_empty() {
            if !self.compact {
                self.commands.push(String::new());
            }
            self.commands.extend(other.commands.iter().cloned());
        }
        if !other.sections.is_empty() {
            if !self.compact {
                self.sections.push(String::new());
            }
            self.sections.extend(other.sections.iter().cloned());
        }
        self.included.extend(other.included.iter().cloned());
        self.changed = true;
        Ok(())
    }

    /// Names of all original fragments folded into this one, in merge order.
    pub fn included_names(&self) -> &[String] {
        &self.included
    }

    /// True once [`Fragment::render`] has produced the final text.
    pub fn is_rendered(&self) -> bool {
        self.state == RenderState::Rendered
    }

    /// Render the final text, injecting the mandatory defaults for this
    /// fragment's version on first call.
    ///
    /// Idempotent: later calls return the identical text and perform no
    /// further mutation. After the first call the fragment rejects merges.
    pub fn render(&mut self) -> Result<String, MergeError> {
        let mandatory = MandatorySet::for_version(self.version.as_deref());
        self.render_with(&mandatory)
    }

    /// Render with an explicit mandatory set.
    ///
    /// The set only matters on the first call; once rendered the text is
    /// final. Mandatory bits that conflict with this fragment's content are
    /// filtered out, the survivors fold into one fragment named
    /// `Mandatory`, and that fold merges in before the text is produced.
    pub fn render_with(&mut self, mandatory: &MandatorySet) -> Result<String, MergeError> {
        if self.state == RenderState::Open {
            let required: Vec<Fragment> = mandatory
                .fragments()
                .into_iter()
                .filter(|bit| !bit.conflicts_with(self))
                .collect();
            if let Some((first, rest)) = required.split_first() {
                let mut selected = first.clone();
                for missing in rest {
                    selected.merge(missing)?;
                }
                self.merge(&Fragment::new(MANDATORY_NAME, selected.body()))?;
            }
            self.state = RenderState::Rendered;
        }
        Ok(self.body())
    }

    /// True if any section line opens `%packages`.
    fn has_packages(&self) -> bool {
        self.sections
            .iter()
            .any(|line| line.trim_start().starts_with("%packages"))
    }

    /// Current text of the fragment.
    ///
    /// A fragment that never absorbed another reproduces its original body
    /// byte for byte (behind a single provenance comment unless compact).
    fn body(&self) -> String {
        if self.changed {
            let mut text = String::new();
            if !self.commands.is_empty() {
                text.push_str(&self.commands.join("\n"));
            }
            if !self.sections.is_empty() {
                text.push('\n');
                text.push_str(&self.sections.join("\n"));
            }
            text
        } else {
            let mut text = String::new();
            if !self.compact {
                text.push_str("# ksbuild ");
                text.push_str(&self.included.join(" "));
                text.push('\n');
            }
            text.push_str(&self.initial_body);
            text
        }
    }
}
