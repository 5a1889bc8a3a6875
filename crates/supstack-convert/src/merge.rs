use std::collections::HashSet;

use supstack_core::state::Item;

/// Appends `converted` after `existing` and drops later records whose id was
/// already seen. Order of first occurrences is preserved.
pub fn merge_catalog(existing: Vec<Item>, converted: Vec<Item>) -> Vec<Item> {
    let mut seen = HashSet::new();
    let mut merged = Vec::with_capacity(existing.len() + converted.len());
    for item in existing.into_iter().chain(converted) {
        if seen.insert(item.id.clone()) {
            merged.push(item);
        } else {
            log::debug!("dropping duplicate supplement `{}` during merge", item.id);
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::mapper::convert_supplement;
    use crate::source::SourceSupplement;

    fn item(id: &str, name: &str) -> Item {
        convert_supplement(&SourceSupplement {
            id: Some(id.to_string()),
            name: Some(name.to_string()),
            ..SourceSupplement::default()
        })
    }

    fn ids(items: &[Item]) -> Vec<&str> {
        items.iter().map(|item| item.id.as_str()).collect()
    }

    #[test]
    fn existing_records_win_over_converted_duplicates() {
        let existing = vec![item("curcumin", "Curcumin"), item("ginger", "Ginger")];
        let converted = vec![
            item("ginger", "Ginger Root Extract"),
            item("quercetin", "Quercetin"),
        ];

        let merged = merge_catalog(existing, converted);

        assert_eq!(ids(&merged), vec!["curcumin", "ginger", "quercetin"]);
        assert_eq!(merged[1].name, "Ginger");
    }

    #[test]
    fn duplicates_within_one_batch_keep_first() {
        let merged = merge_catalog(
            Vec::new(),
            vec![item("a", "First"), item("b", "B"), item("a", "Second")],
        );
        assert_eq!(ids(&merged), vec!["a", "b"]);
        assert_eq!(merged[0].name, "First");
    }
}
