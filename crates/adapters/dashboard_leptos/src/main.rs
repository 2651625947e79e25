use leptos::prelude::*;
use tiadmin_dashboard::App;
use tiadmin_dashboard::api::load_settings;

fn main() {
    leptos::task::spawn_local(async {
        let settings = load_settings().await;
        leptos::logging::log!("tiadmin dashboard using API at {}", settings.api_base);
        leptos::mount::mount_to_body(move || view! { <App settings/> });
    });
}
