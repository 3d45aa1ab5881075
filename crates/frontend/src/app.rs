use crate::usecases::u508_import_csv::ImportCsvView;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    view! {
        <main class="app">
            <ImportCsvView />
        </main>
    }
}
