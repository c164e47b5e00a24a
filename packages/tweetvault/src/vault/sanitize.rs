//! File-system name sanitization.

use crate::classifier::UNCATEGORIZED;

const PATH_HOSTILE: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Replace each of `< > : " / \ | ? *` with `_`, then trim.
///
/// An empty result becomes `Uncategorized`; `.` and `..` become `_` so a name can never
/// escape the output directory.
pub fn sanitize_path(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| if PATH_HOSTILE.contains(&c) { '_' } else { c })
        .collect();

    match replaced.trim() {
        "" => UNCATEGORIZED.to_string(),
        "." | ".." => "_".to_string(),
        trimmed => trimmed.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_replaces_hostile_characters() {
        assert_eq!(sanitize_path("A/B: C*D"), "A_B_ C_D");
        assert_eq!(sanitize_path(r#"<a>"b"\c|d?"#), "_a__b__c_d_");
    }

    #[test]
    fn test_trims_and_guards_special_names() {
        assert_eq!(sanitize_path("Tech "), "Tech");
        assert_eq!(sanitize_path("   "), UNCATEGORIZED);
        assert_eq!(sanitize_path(".."), "_");
        assert_eq!(sanitize_path(" . "), "_");
        assert_eq!(sanitize_path("AI/ML"), "AI_ML");
    }

    proptest! {
        #[test]
        fn prop_output_is_a_single_safe_component(name in "\\PC{0,40}") {
            let out = sanitize_path(&name);
            prop_assert!(!out.is_empty());
            prop_assert!(!out.contains(PATH_HOSTILE));
            prop_assert_eq!(out.trim(), out.as_str());
            prop_assert!(out != "." && out != "..");
        }

        #[test]
        fn prop_idempotent(name in "\\PC{0,40}") {
            let once = sanitize_path(&name);
            prop_assert_eq!(sanitize_path(&once), once);
        }
    }
}
