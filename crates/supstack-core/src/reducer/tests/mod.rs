use pretty_assertions::assert_eq;

pub(super) use super::reduce;
pub(super) use super::StackEffect;
pub(super) use crate::actions::RuntimeAction;
pub(super) use crate::actions::SessionAction;
pub(super) use crate::actions::UserAction;
pub(super) use crate::catalog::test_support::catalog;
pub(super) use crate::catalog::Catalog;
pub(super) use crate::persistence::PersistedStackEntry;
pub(super) use crate::state::Category;
pub(super) use crate::state::CategoryFilter;
pub(super) use crate::state::SessionState;
pub(super) use crate::state::SortKey;
pub(super) use crate::state::Tab;
pub(super) use crate::state::ViewMode;


fn user(state: &mut SessionState, catalog: &Catalog, action: UserAction) -> Vec<StackEffect> {
    reduce(state, catalog, SessionAction::User(action))
}

fn add(state: &mut SessionState, catalog: &Catalog, id: &str) -> Vec<StackEffect> {
    user(
        state,
        catalog,
        UserAction::AddToStack {
            item_id: id.to_string(),
        },
    )
}

fn stack_ids(state: &SessionState) -> Vec<String> {
    state.stack.item_ids().map(str::to_string).collect()
}

fn persists(effects: &[StackEffect]) -> bool {
    effects.contains(&StackEffect::PersistStack)
}

fn notifications(effects: &[StackEffect]) -> Vec<&str> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            StackEffect::Notify(message) => Some(message.as_str()),
            _ => None,
        })
        .collect()
}

fn assert_persisted_matches(state: &SessionState, expected: &[(&str, f64)]) {
    let persisted: Vec<(String, f64)> = state
        .stack
        .to_persisted()
        .into_iter()
        .map(|entry| (entry.supplement_id, entry.multiplier))
        .collect();
    let expected: Vec<(String, f64)> = expected
        .iter()
        .map(|(id, multiplier)| (id.to_string(), *multiplier))
        .collect();
    assert_eq!(persisted, expected);
}
