//! Composite packing
//!
//! Greedy first-fit assignment of fragments to composites: each fragment
//! merges into the first existing composite it does not conflict with, or
//! starts a new composite. First-fit is stable and deterministic but not
//! guaranteed to minimize the composite count; fragment conflict graphs
//! are small and sparse in practice.

use crate::error::MergeError;
use crate::fragment::Fragment;
use crate::mandatory::MandatorySet;

/// Pack fragments into non-conflicting composites, preserving input order.
///
/// Placement is pre-checked with [`Fragment::conflicts_with`], so conflicts
/// never surface as errors here; a [`MergeError::DuplicateInclude`] is
/// propagated when two inputs share an original fragment name.
pub fn build_composites(fragments: Vec<Fragment>) -> Result<Vec<Fragment>, MergeError> {
    let mut composites: Vec<Fragment> = Vec::new();
    for fragment in fragments {
        let slot = composites
            .iter()
            .position(|composite| !composite.conflicts_with(&fragment));
        match slot {
            Some(index) => composites[index].merge(&fragment)?,
            None => composites.push(fragment),
        }
    }
    Ok(composites)
}

/// Pack and render in one step.
///
/// Each composite renders with the mandatory set for its own version.
/// Returns one text blob per composite, in order.
pub fn compose(fragments: Vec<Fragment>) -> Result<Vec<String>, MergeError> {
    let mut texts = Vec::new();
    for mut composite in build_composites(fragments)? {
        texts.push(composite.render()?);
    }
    Ok(texts)
}

/// Pack and render with an explicit mandatory set.
pub fn compose_with(
    fragments: Vec<Fragment>,
    mandatory: &MandatorySet,
) -> Result<Vec<String>, MergeError> {
    let mut texts = Vec::new();
    for mut composite in build_composites(fragments)? {
        texts.push(composite.render_with(mandatory)?);
    }
    Ok(texts)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs() -> Vec<Fragment> {
        vec![
            Fragment::new("ks1", "graphical"),
            Fragment::new("ks2", "text"),
            Fragment::new("ks3", "autopart"),
            Fragment::new("ks4", "rootpw secret"),
        ]
    }

    #[test]
    fn test_first_fit_packs_compatible_fragments_together() {
        let composites = build_composites(inputs()).unwrap();
        assert_eq!(composites.len(), 2);
        assert_eq!(composites[0].included_names(), ["ks1", "ks3", "ks4"]);
        assert_eq!(composites[1].included_names(), ["ks2"]);
    }

    #[test]
    fn test_single_fragment_passes_through() {
        let composites =
            build_composites(vec![Fragment::new("ks1", "graphical")]).unwrap();
        assert_eq!(composites.len(), 1);
        assert_eq!(composites[0].included_names(), ["ks1"]);
    }

    #[test]
    fn test_empty_input_yields_no_composites() {
        assert_eq!(build_composites(Vec::new()).unwrap().len(), 0);
    }

    #[test]
    fn test_pairwise_conflicting_inputs_stay_separate() {
        let composites = build_composites(vec![
            Fragment::new("a", "graphical"),
            Fragment::new("b", "text"),
            Fragment::new("c", "vnc"),
        ])
        .unwrap();
        assert_eq!(composites.len(), 3);
    }

    #[test]
    fn test_duplicate_names_propagate() {
        let err = build_composites(vec![
            Fragment::new("ks1", "graphical"),
            Fragment::new("ks1", "autopart"),
        ])
        .unwrap_err();
        assert!(matches!(err, MergeError::DuplicateInclude { .. }));
    }

    #[test]
    fn test_compose_renders_each_composite() {
        let texts = compose(inputs()).unwrap();
        assert_eq!(texts.len(), 2);
        // First composite already covers partitioning and rootpw, so those
        // defaults stay out; the interface default never existed.
        assert!(texts[0].contains("graphical"));
        assert!(texts[0].contains("rootpw secret"));
        assert!(!texts[0].contains("rootpw anaconda"));
        assert!(texts[0].contains("keyboard us"));
        // Second composite gets the full partitioning default back.
        assert!(texts[1].contains("text"));
        assert!(texts[1].contains("autopart"));
        assert!(texts[1].contains("rootpw anaconda"));
    }

    #[test]
    fn test_compose_with_extra_directive() {
        let mandatory = MandatorySet::standard().with_extras(["reboot"]);
        let texts = compose_with(
            vec![Fragment::new("ks1", "graphical")],
            &mandatory,
        )
        .unwrap();
        assert!(texts[0].contains("reboot"));

        let texts = compose_with(
            vec![Fragment::new("ks6", "reboot --eject")],
            &mandatory,
        )
        .unwrap();
        // A fragment already claiming the command keeps the extra out.
        assert!(!texts[0].contains("# ksbuild Mandatory\nreboot"));
        assert!(texts[0].contains("reboot --eject"));
    }
}
