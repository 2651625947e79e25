//! # tiadmin-dashboard
//!
//! Leptos single-page dashboard for the TiAdmin management API.
//!
//! The shell owns the shared host store and hands the API clients and a
//! read-only view of the store to every page through context. Each page
//! builds its view-model, activates it, and keeps the activation alive for
//! exactly as long as the page is mounted.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_router::{
    components::{Redirect, Route, Router, Routes},
    path,
};
use tiadmin_app::host_store::{HostReader, HostStore};
use tiadmin_domain::settings::DashboardSettings;

pub mod api;
mod components;
mod pages;
pub mod scheduler;

use api::{GlooAdminApi, GlooCounterApi};
use components::Sidebar;
use pages::{Chart, Counter, Home, HostStatus, NotFound, Services};
use scheduler::GlooScheduler;

/// Everything pages need, provided once by [`App`].
#[derive(Clone)]
pub struct DashboardContext {
    pub settings: DashboardSettings,
    pub api: Arc<GlooAdminApi>,
    pub counter: Arc<GlooCounterApi>,
    pub hosts: HostReader,
}

/// Access the dashboard context.
///
/// Must be called within the [`App`] component tree.
pub fn use_dashboard() -> DashboardContext {
    use_context::<DashboardContext>().expect("DashboardContext not found in context")
}

/// Keep `value` alive until the current owner (usually a component) is
/// disposed, then drop it. Used for timer handles, which are not `Send`.
pub(crate) fn hold_while_mounted<T: 'static>(value: T) {
    let _ = StoredValue::new_local(value);
}

/// Root application component.
#[component]
pub fn App(settings: DashboardSettings) -> impl IntoView {
    let api = Arc::new(GlooAdminApi::new(&settings));
    let store = HostStore::new(Arc::clone(&api));
    hold_while_mounted(store.activate(&GlooScheduler, settings.intervals.slow()));

    provide_context(DashboardContext {
        counter: Arc::new(GlooCounterApi::new(&settings)),
        hosts: store.reader(),
        api,
        settings,
    });

    view! {
        <Router>
            <div class="layout">
                <Sidebar/>
                <main>
                    <Routes fallback=|| view! { <NotFound/> }>
                        <Route
                            path=path!("/")
                            view=|| view! { <Redirect path="/dashboard/home"/> }
                        />
                        <Route path=path!("/dashboard/home") view=Home/>
                        <Route path=path!("/dashboard/host-status/:machID") view=HostStatus/>
                        <Route path=path!("/dashboard/services") view=Services/>
                        <Route path=path!("/dashboard/chart") view=Chart/>
                        <Route path=path!("/counter") view=Counter/>
                    </Routes>
                </main>
            </div>
        </Router>
    }
}
