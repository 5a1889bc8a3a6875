use super::catalog::Catalog;
use super::state::CategoryFilter;
use super::state::ItemRef;
use super::state::SessionState;
use super::state::SortKey;

/// Catalog items passing the category filter and search query, sorted.
pub fn visible_items<'c>(
    catalog: &'c Catalog,
    category: CategoryFilter,
    search_query: &str,
    sort_by: SortKey,
) -> Vec<&'c ItemRef> {
    let query = search_query.trim().to_lowercase();
    let mut items: Vec<&ItemRef> = catalog
        .items()
        .iter()
        .filter(|item| category.matches(item.category))
        .filter(|item| {
            query.is_empty()
                || item.name.to_lowercase().contains(&query)
                || item.description.to_lowercase().contains(&query)
        })
        .collect();

    match sort_by {
        SortKey::Name => items.sort_by_key(|item| item.name.to_lowercase()),
        SortKey::AntiInflammatory => items.sort_by(|a, b| {
            b.anti_inflammatory_potential
                .total_cmp(&a.anti_inflammatory_potential)
        }),
    }
    items
}

pub fn visible_items_for<'c>(state: &SessionState, catalog: &'c Catalog) -> Vec<&'c ItemRef> {
    visible_items(catalog, state.category, &state.search_query, state.sort_by)
}
