//! Placeholder shown until the first successful fetch.

use leptos::prelude::*;

/// Spinner plus "Waiting for <what>…". Failed fetches keep it on screen.
#[component]
pub fn Loading(what: &'static str) -> impl IntoView {
    view! {
        <div class="loading">
            <span class="spinner"></span>
            <span>"Waiting for " {what} "\u{2026}"</span>
        </div>
    }
}
