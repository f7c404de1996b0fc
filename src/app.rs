use std::rc::Rc;

use dioxus::logger::tracing::{info, warn};
use dioxus::prelude::*;

use crate::domain::entities::edit::{CellKey, StagedEdits};
use crate::infra::config::ApiConfig;
use crate::infra::http::client::HttpTrackerApi;
use crate::infra::http::endpoints;
use crate::ui::state::app_state::AppState;
use crate::ui::state::tracker_view::{ColumnKind, FilterDropdown, SheetLoadTicket, TrackerView};
use crate::usecase::services::edit_service::EditService;
use crate::usecase::services::query_service::QueryService;
use crate::{
    root_container_style, table_cell_style, table_container_style, table_head_style,
    table_header_cell_style, ALL_OPTION_LABEL, CHECKER_DATALIST_ID,
};

type Queries = Rc<QueryService<HttpTrackerApi>>;
type Edits = Rc<EditService<HttpTrackerApi>>;

async fn load_sheet_into(mut view: Signal<TrackerView>, queries: Queries, ticket: SheetLoadTicket) {
    let payload = queries.load_sheet(ticket.sheet()).await;
    let rows = payload.dataset.row_count();
    if view.write().finish_sheet_load(&ticket, payload) {
        info!("rendered sheet '{}' with {rows} rows", ticket.sheet());
    } else {
        warn!("discarded stale data for sheet '{}'", ticket.sheet());
    }
}

fn start_sheet_load(
    mut view: Signal<TrackerView>,
    mut staged_edits: Signal<StagedEdits>,
    queries: Queries,
    sheet: String,
) {
    staged_edits.write().clear();
    let ticket = view.write().begin_sheet_load(sheet);
    spawn(load_sheet_into(view, queries, ticket));
}

fn commit_checker(
    mut view: Signal<TrackerView>,
    mut staged_edits: Signal<StagedEdits>,
    edits: Edits,
    source_row: usize,
) {
    let Some(update) = view
        .write()
        .commit_checker(&mut staged_edits.write(), source_row)
    else {
        return;
    };
    spawn(async move {
        edits.save_checker(update).await;
    });
}

fn commit_blank_column(
    mut view: Signal<TrackerView>,
    mut staged_edits: Signal<StagedEdits>,
    edits: Edits,
    source_row: usize,
) {
    let Some(update) = view
        .write()
        .commit_blank_column(&mut staged_edits.write(), source_row)
    else {
        return;
    };
    spawn(async move {
        edits.update_blank_column(update).await;
    });
}

#[component]
fn FilterSelect(
    filter: FilterDropdown,
    on_change: EventHandler<(String, Option<String>)>,
) -> Element {
    let select_id = format!("filter-{}", filter.column);
    let selected = filter.selected.clone().unwrap_or_default();
    let data_value = selected.to_lowercase();
    let column = filter.column.clone();

    rsx! {
        select {
            id: "{select_id}",
            class: "filter-dropdown",
            "data-value": "{data_value}",
            value: "{selected}",
            onchange: move |event| {
                on_change.call((column.clone(), Some(event.value())));
            },
            option { value: "", selected: filter.selected.is_none(), "{ALL_OPTION_LABEL}" }
            for value in filter.options.iter() {
                option {
                    value: "{value}",
                    selected: filter.selected.as_deref() == Some(value.as_str()),
                    "{value}"
                }
            }
        }
    }
}

#[component]
pub fn App() -> Element {
    let api = use_hook(|| {
        ApiConfig::from_environment()
            .map(|config| Rc::new(HttpTrackerApi::new(config)))
            .map_err(|err| err.to_string())
    });
    let api = match api {
        Ok(api) => api,
        Err(err) => {
            return rsx! {
                div {
                    p { "Unable to resolve backend address: {err}" }
                }
            };
        }
    };

    let AppState {
        mut view,
        mut staged_edits,
    } = AppState::new();

    let project_base = api.base_url().clone();
    let queries: Queries = Rc::new(QueryService::new(api.clone()));
    let edits: Edits = Rc::new(EditService::new(api));

    let queries_for_init = queries.clone();
    use_hook(move || {
        spawn(async move {
            let checkers = queries_for_init.load_checker_list().await;
            view.write().set_checker_list(checkers);

            let sheets = queries_for_init.list_sheets().await;
            let first_sheet = view.write().set_sheets(sheets);
            if let Some(sheet) = first_sheet {
                staged_edits.write().clear();
                let ticket = view.write().begin_sheet_load(sheet);
                load_sheet_into(view, queries_for_init, ticket).await;
            }
        });
    });

    let queries_for_select = queries.clone();
    let sheets = view.read().sheets().to_vec();
    let selected_sheet = view.read().selected_sheet().unwrap_or_default().to_string();
    let checker_list = view.read().checker_list().to_vec();
    let search_input = view.read().search_input().to_string();
    let status = view.read().status_line();
    let has_data = !view.read().dataset().is_empty();
    let loading = view.read().is_loading();
    let table = view.read().table();
    let drafts = staged_edits();

    rsx! {
        div {
            style: "{root_container_style()}",

            h2 { "Project Tracker" }

            div {
                style: "display: flex; gap: 12px; align-items: center; margin-bottom: 12px;",
                label { "Sheet " }
                select {
                    id: "sheetSelector",
                    value: "{selected_sheet}",
                    onchange: move |event| {
                        start_sheet_load(view, staged_edits, queries_for_select.clone(), event.value());
                    },
                    for sheet in sheets.iter() {
                        option {
                            value: "{sheet}",
                            selected: *sheet == selected_sheet,
                            "{sheet}"
                        }
                    }
                }
                input {
                    id: "searchInput",
                    placeholder: "Search",
                    value: "{search_input}",
                    oninput: move |event| view.write().set_search(&event.value()),
                }
                span { "{status}" }
            }

            datalist {
                id: "{CHECKER_DATALIST_ID}",
                for name in checker_list.iter() {
                    option { value: "{name}" }
                }
            }

            if !has_data {
                p {
                    if loading { "Loading…" } else { "No data available" }
                }
            } else {
                div {
                    style: "{table_container_style()}",
                    table { style: "border-collapse: collapse; width: 100%; background: #fff;",
                        thead { style: "{table_head_style()}",
                            tr {
                                for column in table.columns.iter() {
                                    th { style: "{table_header_cell_style()}", "{column.name}" }
                                }
                                th { style: "{table_header_cell_style()}", "Checker" }
                                th { style: "{table_header_cell_style()}", "Actions" }
                            }
                            tr {
                                for column in table.columns.iter() {
                                    th { style: "{table_header_cell_style()}",
                                        FilterSelect {
                                            filter: column.filter.clone(),
                                            on_change: move |(column, value): (String, Option<String>)| {
                                                view.write().set_filter(&column, value);
                                            },
                                        }
                                    }
                                }
                                th { style: "{table_header_cell_style()}",
                                    FilterSelect {
                                        filter: table.checker_filter.clone(),
                                        on_change: move |(column, value): (String, Option<String>)| {
                                            view.write().set_filter(&column, value);
                                        },
                                    }
                                }
                                th { style: "{table_header_cell_style()}" }
                            }
                        }
                        tbody {
                            {table.rows.iter().map(|row| {
                                let source_row = row.source_row;
                                let checker_key = CellKey::checker(source_row);
                                let blank_key = CellKey::blank_column(source_row);
                                let checker_value = drafts
                                    .draft(&checker_key)
                                    .map(str::to_string)
                                    .unwrap_or_else(|| row.checker.clone());
                                let edits_for_checker_enter = edits.clone();
                                let edits_for_checker_blur = edits.clone();
                                let project_href = row
                                    .row_id
                                    .as_deref()
                                    .and_then(|id| endpoints::project_page(&project_base, id).ok());
                                let cells = table.columns.iter().zip(row.cells.iter()).map(|(column, text)| {
                                    match column.kind {
                                        ColumnKind::Text => rsx!(
                                            td { style: "{table_cell_style()}", "{text}" }
                                        ),
                                        ColumnKind::BlankColumn => {
                                            let blank_value = drafts
                                                .draft(&blank_key)
                                                .map(str::to_string)
                                                .unwrap_or_else(|| text.clone());
                                            let edits_for_blank_enter = edits.clone();
                                            let edits_for_blank_blur = edits.clone();
                                            rsx!(
                                                td { style: "{table_cell_style()}",
                                                    input {
                                                        r#type: "text",
                                                        class: "blank-column-input",
                                                        value: "{blank_value}",
                                                        oninput: move |event| {
                                                            staged_edits.write().stage(blank_key, event.value());
                                                        },
                                                        onkeydown: move |event| {
                                                            if event.key() == Key::Enter {
                                                                commit_blank_column(view, staged_edits, edits_for_blank_enter.clone(), source_row);
                                                            }
                                                        },
                                                        onblur: move |_| {
                                                            commit_blank_column(view, staged_edits, edits_for_blank_blur.clone(), source_row);
                                                        },
                                                    }
                                                }
                                            )
                                        }
                                    }
                                });
                                rsx!(
                                    tr {
                                        {cells}
                                        td { style: "{table_cell_style()}",
                                            input {
                                                r#type: "text",
                                                class: "checker-input",
                                                "list": "{CHECKER_DATALIST_ID}",
                                                value: "{checker_value}",
                                                oninput: move |event| {
                                                    staged_edits.write().stage(checker_key, event.value());
                                                },
                                                onkeydown: move |event| {
                                                    if event.key() == Key::Enter {
                                                        commit_checker(view, staged_edits, edits_for_checker_enter.clone(), source_row);
                                                    }
                                                },
                                                onblur: move |_| {
                                                    commit_checker(view, staged_edits, edits_for_checker_blur.clone(), source_row);
                                                },
                                            }
                                        }
                                        td { style: "{table_cell_style()}",
                                            if let Some(href) = project_href {
                                                a { class: "view-project-button", href: "{href}", "View Project" }
                                            }
                                        }
                                    }
                                )
                            })}
                        }
                    }
                }
            }
        }
    }
}
