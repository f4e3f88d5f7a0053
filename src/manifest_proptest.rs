//! Property-based tests for manifest merging.
//!
//! These tests use proptest to generate random entry lists and verify that
//! the merge invariants hold for all of them.

#[cfg(test)]
mod proptest_tests {
    use crate::manifest::{merge, RepositoryEntry};
    use proptest::prelude::*;
    use std::collections::{HashMap, HashSet};
    use std::path::PathBuf;

    fn entries() -> impl Strategy<Value = Vec<RepositoryEntry>> {
        prop::collection::vec(("/r/[a-d]{1,3}", "[a-z]{1,6}"), 0..16).prop_map(|pairs| {
            pairs
                .into_iter()
                .map(|(directory, remote)| RepositoryEntry::new(directory, remote))
                .collect()
        })
    }

    proptest! {
        /// Property: every directory appears exactly once, with the value from the later list
        #[test]
        fn merge_keeps_later_value_once(earlier in entries(), later in entries()) {
            let mut expected: HashMap<PathBuf, String> = HashMap::new();
            for entry in earlier.iter().chain(later.iter()) {
                expected.insert(entry.directory.clone(), entry.remote.clone());
            }

            let merged = merge(earlier, later);

            let directories: HashSet<_> = merged.iter().map(|e| e.directory.clone()).collect();
            prop_assert_eq!(directories.len(), merged.len());
            prop_assert_eq!(merged.len(), expected.len());
            for entry in &merged {
                prop_assert_eq!(Some(&entry.remote), expected.get(&entry.directory));
            }
        }

        /// Property: merge output is sorted by directory
        #[test]
        fn merge_output_is_sorted(earlier in entries(), later in entries()) {
            let merged = merge(earlier, later);
            for pair in merged.windows(2) {
                prop_assert!(pair[0].directory.as_os_str() < pair[1].directory.as_os_str());
            }
        }

        /// Property: merging a merged manifest with itself changes nothing
        #[test]
        fn merge_with_self_is_idempotent(input in entries()) {
            let sorted = merge(input, Vec::new());
            let again = merge(sorted.clone(), sorted.clone());
            prop_assert_eq!(again, sorted);
        }
    }
}
