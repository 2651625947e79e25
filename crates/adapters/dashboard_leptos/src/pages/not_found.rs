use leptos::prelude::*;
use leptos_router::components::Redirect;

/// Unknown paths land on the home view.
#[component]
pub fn NotFound() -> impl IntoView {
    view! {
        <div class="not-found">
            <p>"Page not found, redirecting to home\u{2026}"</p>
            <Redirect path="/dashboard/home"/>
        </div>
    }
}
