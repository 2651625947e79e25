//! Sidebar: navigation plus the host list from the shared host store.

use leptos::prelude::*;
use leptos_router::components::A;
use tiadmin_app::ports::Scheduler;
use tiadmin_domain::host::Host;

use crate::scheduler::GlooScheduler;
use crate::{hold_while_mounted, use_dashboard};

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_dashboard();
    let reader = ctx.hosts.clone();
    let hosts = RwSignal::new(reader.hosts());

    // The store refreshes itself; the sidebar only re-reads the cache.
    hold_while_mounted(GlooScheduler.every(ctx.settings.intervals.sidebar(), move || {
        let latest = reader.hosts();
        if hosts.with_untracked(|current| *current != latest) {
            hosts.set(latest);
        }
    }));

    view! {
        <nav class="sidebar">
            <h2>"TiAdmin"</h2>
            <ul>
                <li><A href="/dashboard/home">"Home"</A></li>
                <li><A href="/dashboard/services">"Services"</A></li>
                <li><A href="/dashboard/chart">"Charts"</A></li>
                <li><A href="/counter">"Counter"</A></li>
            </ul>
            <h3>"Hosts"</h3>
            <ul>
                <For
                    each=move || hosts.get()
                    key=|host| (host.mach_id.clone(), host.is_alive, host.host_name.clone())
                    let(host)
                >
                    <HostLink host/>
                </For>
            </ul>
        </nav>
    }
}

#[component]
fn HostLink(host: Host) -> impl IntoView {
    let href = format!("/dashboard/host-status/{}", host.mach_id);
    let dot = if host.is_alive { "status-dot alive" } else { "status-dot down" };
    let name = host.display_name().to_string();

    view! {
        <li>
            <span class=dot></span>
            <A href=href>{name}</A>
        </li>
    }
}
