pub mod app_state;
pub mod tracker_view;
