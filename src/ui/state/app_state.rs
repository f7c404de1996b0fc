use dioxus::prelude::{use_signal, Signal};

use crate::domain::entities::edit::StagedEdits;
use crate::ui::state::tracker_view::TrackerView;

pub struct AppState {
    pub view: Signal<TrackerView>,
    pub staged_edits: Signal<StagedEdits>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            view: use_signal(TrackerView::default),
            staged_edits: use_signal(StagedEdits::default),
        }
    }
}
