mod app;
mod domain;
mod infra;
mod platform;
mod ui;
mod usecase;


const ALL_OPTION_LABEL: &str = "-- All --";
const CHECKER_DATALIST_ID: &str = "checker-options";

fn main() {
    platform::logging::init_logging();
    dioxus::launch(app::App);
}

fn root_container_style() -> &'static str {
    "font-family: sans-serif; padding: 12px; background: #fff; height: 100vh; box-sizing: border-box; display: flex; flex-direction: column;"
}

fn table_container_style() -> &'static str {
    "flex: 1; min-height: 0; overflow: auto; border: 1px solid #ddd;"
}

// Sticky on the whole head so the title and filter rows stay stacked.
fn table_head_style() -> &'static str {
    "position: sticky; top: 0; z-index: 10;"
}

fn table_header_cell_style() -> &'static str {
    "border: 1px solid #bbb; padding: 4px; background: #f4f4f4; text-align: left;"
}

fn table_cell_style() -> &'static str {
    "border: 1px solid #bbb; padding: 4px;"
}
