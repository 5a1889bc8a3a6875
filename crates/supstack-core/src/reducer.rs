use super::actions::RuntimeAction;
use super::actions::SessionAction;
use super::actions::UserAction;
use super::catalog::Catalog;
use super::export::render_report;
use super::stack::Stack;
use super::stack::Toggled;
use super::state::SessionState;
use super::state::Tab;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StackEffect {
    RequestFrame,
    /// Snapshot the stack to durable storage.
    PersistStack,
    Notify(String),
    /// Blocking message the host must show before continuing.
    Alert(String),
    DownloadReport {
        contents: String,
    },
}

pub fn reduce(state: &mut SessionState, catalog: &Catalog, action: SessionAction) -> Vec<StackEffect> {
    match action {
        SessionAction::User(user) => reduce_user(state, catalog, user),
        SessionAction::Runtime(runtime) => {
            reduce_runtime(state, catalog, runtime);
            Vec::new()
        }
    }
}

fn reduce_user(state: &mut SessionState, catalog: &Catalog, action: UserAction) -> Vec<StackEffect> {
    match action {
        UserAction::SelectTab(tab) => {
            state.tab = tab;
            vec![StackEffect::RequestFrame]
        }
        UserAction::SetView(view) => {
            state.view = view;
            vec![StackEffect::RequestFrame]
        }
        UserAction::SelectCategory(category) => {
            state.category = category;
            vec![StackEffect::RequestFrame]
        }
        UserAction::SetSearchQuery(query) => {
            state.search_query = query.to_lowercase();
            vec![StackEffect::RequestFrame]
        }
        UserAction::SetSortBy(sort_by) => {
            state.sort_by = sort_by;
            vec![StackEffect::RequestFrame]
        }
        UserAction::ShowDetails { item_id } => {
            if catalog.item(&item_id).is_none() {
                log::debug!("ignoring details request for unknown supplement '{item_id}'");
                return Vec::new();
            }
            state.expanded_item = Some(item_id);
            vec![StackEffect::RequestFrame]
        }
        UserAction::CloseDetails => {
            state.expanded_item = None;
            vec![StackEffect::RequestFrame]
        }
        UserAction::AddToStack { item_id } => {
            let Some(item) = catalog.item(&item_id) else {
                log::debug!("ignoring add of unknown supplement '{item_id}'");
                return Vec::new();
            };
            if !state.stack.add(item.clone()) {
                return Vec::new();
            }
            state.expanded_item = None;
            stack_changed(format!("{} added to your stack!", item.name))
        }
        UserAction::RemoveFromStack { item_id } => match state.stack.remove(&item_id) {
            Some(removed) => stack_changed(format!("{} removed from your stack", removed.item.name)),
            None => Vec::new(),
        },
        UserAction::ToggleStackItem { item_id } => {
            let Some(item) = catalog.item(&item_id) else {
                log::debug!("ignoring toggle of unknown supplement '{item_id}'");
                return Vec::new();
            };
            match state.stack.toggle(item.clone()) {
                Toggled::Added => {
                    state.expanded_item = None;
                    stack_changed(format!("{} added to your stack!", item.name))
                }
                Toggled::Removed => stack_changed(format!("{} removed from your stack", item.name)),
            }
        }
        UserAction::SetMultiplier { item_id, value } => {
            if !state.stack.set_multiplier(&item_id, value) {
                log::debug!("rejected multiplier {value} for '{item_id}'");
                return Vec::new();
            }
            vec![StackEffect::PersistStack, StackEffect::RequestFrame]
        }
        UserAction::ClearStack => {
            state.stack.clear();
            stack_changed("Stack cleared!".to_string())
        }
        UserAction::ApplyTemplate { template_id } => {
            let Some(template) = catalog.template(&template_id) else {
                log::warn!("unknown stack template '{template_id}'");
                return Vec::new();
            };
            let skipped = state.stack.apply_template(template, catalog);
            if !skipped.is_empty() {
                log::warn!(
                    "template '{}' names supplements missing from the catalog: {}",
                    template.id,
                    skipped.join(", ")
                );
            }
            state.tab = Tab::MyStack;
            stack_changed(format!("Applied \"{}\" template!", template.name))
        }
        UserAction::ExportStack => match render_report(&state.stack, catalog) {
            Ok(contents) => vec![
                StackEffect::DownloadReport { contents },
                StackEffect::Notify("Stack exported successfully!".to_string()),
            ],
            Err(err) => vec![StackEffect::Alert(err.to_string())],
        },
    }
}

fn reduce_runtime(state: &mut SessionState, catalog: &Catalog, action: RuntimeAction) {
    match action {
        RuntimeAction::RestoreStack(persisted) => {
            state.stack = Stack::restore(&persisted, catalog);
            log::debug!("restored {} stack entries", state.stack.len());
        }
    }
}

fn stack_changed(message: String) -> Vec<StackEffect> {
    vec![
        StackEffect::PersistStack,
        StackEffect::Notify(message),
        StackEffect::RequestFrame,
    ]
}

#[cfg(test)]
mod tests;
