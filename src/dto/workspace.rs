//! Page data of a navigable collection: list, stats and current selection.

use serde::Serialize;

use crate::domain::entity::{Navigable, Summarize};
use crate::services::navigation::{CreateIntent, SelectionPhase};

#[derive(Debug, Serialize)]
#[serde(bound(serialize = "E: Serialize, E::Stats: Serialize"))]
pub struct WorkspaceData<E: Navigable + Summarize> {
    pub state: SelectionPhase,
    /// Record shown in the detail pane, if any.
    pub selected: Option<E>,
    pub editing: bool,
    pub items: Vec<E>,
    pub stats: E::Stats,
    /// Present when the URL asks for a creation form.
    pub create: Option<CreateIntent>,
    /// First error captured while loading the list or the selection.
    pub error: Option<String>,
}
