use super::api::BrowserTransport;
use super::controller::UploadImportController;
use super::file_reader::{read_upload_file, selected_file};
use super::state::{ControllerState, ImportSummary, UploadFile, UploadSelection};
use crate::shared::config::{load_config, stored_overrides};
use contracts::usecases::common::UseCaseMetadata;
use contracts::usecases::u508_import_csv::{ImportCsv, PreviewResponse};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::rc::Rc;
use thaw::*;

#[component]
pub fn ImportCsvView() -> impl IntoView {
    let config = load_config(stored_overrides().as_deref());

    let (state, set_state) = signal(ControllerState::default());
    let (upload_file, set_upload_file) = signal(Option::<UploadFile>::None);
    let (is_reading, set_is_reading) = signal(false);
    let (read_error, set_read_error) = signal(Option::<String>::None);
    let (service_up, set_service_up) = signal(Option::<bool>::None);
    let has_header = RwSignal::new(true);

    let controller = Rc::new(
        UploadImportController::new(BrowserTransport::new(config.ingest))
            .with_observer(move |s: &ControllerState| set_state.set(s.clone())),
    );
    let controller_sv = StoredValue::new_local(controller);

    let current_selection = move || {
        upload_file
            .get_untracked()
            .map(|file| UploadSelection::new(file, has_header.get_untracked()))
    };

    spawn_local(async move {
        let controller = controller_sv.get_value();
        set_service_up.set(Some(controller.check_health().await));
    });

    let handle_file_select = move |ev: web_sys::Event| {
        let Some(file) = selected_file(&ev) else {
            set_upload_file.set(None);
            return;
        };
        set_read_error.set(None);
        set_is_reading.set(true);
        spawn_local(async move {
            match read_upload_file(file).await {
                Ok(upload) => {
                    log::debug!("Selected {} ({} bytes)", upload.name, upload.size);
                    set_upload_file.set(Some(upload));
                }
                Err(e) => {
                    log::error!("{}", e);
                    set_upload_file.set(None);
                    set_read_error.set(Some(e));
                }
            }
            set_is_reading.set(false);
        });
    };

    let handle_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let selection = current_selection();
        let controller = controller_sv.get_value();
        spawn_local(async move {
            // Outcome is already reflected in the controller state
            let _ = controller.request_preview(selection.as_ref()).await;
        });
    };

    let handle_proceed = move |_| {
        let selection = current_selection();
        let controller = controller_sv.get_value();
        spawn_local(async move {
            let _ = controller.request_import(selection.as_ref()).await;
        });
    };

    view! {
        <div id=ImportCsv::element_id() class="csv-import">
            <div class="csv-import__header">
                <h2>{ImportCsv::display_name()}</h2>
                {move || service_up.get().map(|up| {
                    view! {
                        <span class=if up { "csv-import__health csv-import__health--up" } else { "csv-import__health csv-import__health--down" }>
                            {if up { "Service online" } else { "Service unreachable" }}
                        </span>
                    }
                })}
            </div>
            <p class="csv-import__description">{ImportCsv::description()}</p>

            <form id="upload-form" class="csv-import__form" on:submit=handle_submit>
                <input
                    id="file"
                    type="file"
                    accept=".csv,text/csv"
                    on:change=handle_file_select
                />
                <Checkbox checked=has_header label="First row contains column headers"/>
                <button
                    type="submit"
                    class="button button--primary"
                    prop:disabled=move || is_reading.get() || !state.get().preview_enabled()
                >
                    "Upload & preview"
                </button>
            </form>

            {move || upload_file.get().map(|file| {
                view! {
                    <span class="csv-import__fileinfo">
                        <strong>{file.name}</strong>
                        {format!(" ({:.2} KB)", file.size as f64 / 1024.0)}
                    </span>
                }
            })}

            {move || read_error.get().map(|e| {
                view! {
                    <div class="warning-box warning-box--error">
                        <span class="warning-box__icon">"⚠"</span>
                        <span class="warning-box__text">{e}</span>
                    </div>
                }
            })}

            {move || state.get().message.map(|msg| {
                let class = msg.css_class();
                view! { <div id="messages" class=class>{msg.text}</div> }
            })}

            {move || state.get().preview.map(|preview| view! { <PreviewTable preview=preview/> })}

            <div class="csv-import__actions">
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=handle_proceed
                    disabled=Signal::derive(move || !state.get().import_enabled())
                >
                    "Proceed with import"
                </Button>
            </div>

            {move || state.get().import.map(|summary| view! { <ImportResultPanel summary=summary/> })}
        </div>
    }
}

#[component]
fn PreviewTable(preview: PreviewResponse) -> impl IntoView {
    let headers = preview.headers().to_vec();
    let has_headers = !headers.is_empty();

    view! {
        <div id="preview">
            <table class="preview-table">
                {has_headers.then(|| view! {
                    <thead>
                        <tr>
                            {headers.into_iter().map(|h| view! { <th>{h}</th> }).collect_view()}
                        </tr>
                    </thead>
                })}
                <tbody>
                    {preview.rows.into_iter().map(|row| view! {
                        <tr>
                            {row.into_iter().map(|cell| view! { <td>{cell}</td> }).collect_view()}
                        </tr>
                    }).collect_view()}
                </tbody>
            </table>
        </div>
    }
}

#[component]
fn ImportResultPanel(summary: ImportSummary) -> impl IntoView {
    let summary_line = summary.summary_line();
    let archive_error_line = summary.archive_error_line();
    let row_error_lines = summary.row_error_lines();
    let archive_link_note = summary.archive_link_note();

    view! {
        <div id="import-result">
            {summary_line}
            {summary.archive_url.map(|url| view! {
                <br/>
                <a href=url target="_blank" rel="noopener noreferrer">{archive_link_note}</a>
            })}
            {archive_error_line.map(|line| view! {
                <br/>
                <div class="error">{line}</div>
            })}
            {(!row_error_lines.is_empty()).then(|| view! {
                <ul class="csv-import__row-errors">
                    {row_error_lines.into_iter().map(|line| view! { <li>{line}</li> }).collect_view()}
                </ul>
            })}
        </div>
    }
}
