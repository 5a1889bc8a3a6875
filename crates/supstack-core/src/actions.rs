use super::persistence::PersistedStackEntry;
use super::state::CategoryFilter;
use super::state::SortKey;
use super::state::Tab;
use super::state::ViewMode;

#[derive(Debug, Clone, PartialEq)]
pub enum SessionAction {
    User(UserAction),
    Runtime(RuntimeAction),
}

#[derive(Debug, Clone, PartialEq)]
pub enum UserAction {
    SelectTab(Tab),
    SetView(ViewMode),
    SelectCategory(CategoryFilter),
    SetSearchQuery(String),
    SetSortBy(SortKey),
    ShowDetails { item_id: String },
    CloseDetails,
    AddToStack { item_id: String },
    RemoveFromStack { item_id: String },
    ToggleStackItem { item_id: String },
    SetMultiplier { item_id: String, value: f64 },
    ClearStack,
    ApplyTemplate { template_id: String },
    ExportStack,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeAction {
    RestoreStack(Vec<PersistedStackEntry>),
}

impl From<UserAction> for SessionAction {
    fn from(action: UserAction) -> Self {
        Self::User(action)
    }
}

impl From<RuntimeAction> for SessionAction {
    fn from(action: RuntimeAction) -> Self {
        Self::Runtime(action)
    }
}
