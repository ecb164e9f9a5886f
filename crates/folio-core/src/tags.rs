//! Tag helpers.

use std::collections::BTreeSet;

/// Sorted, deduplicated union of tags.
pub fn collect_tags<'a, I>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a String>,
{
    tags.into_iter()
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
