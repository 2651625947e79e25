use std::sync::Arc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_params_map;
use tiadmin_app::view_models::{HostStatusViewModel, ProcessAction};
use tiadmin_domain::form::NewProcessForm;
use tiadmin_domain::host::Host;
use tiadmin_domain::id::{MachId, ProcId};

use super::{handle_create_result, log_action_failure};
use crate::components::{Loading, NewProcessDialog, ProcessTable, StatCard};
use crate::scheduler::GlooScheduler;
use crate::{hold_while_mounted, use_dashboard};

/// `/dashboard/host-status/:machID`
///
/// A new panel (and view-model) is mounted whenever the host changes, so the
/// previous host's polling stops with it.
#[component]
pub fn HostStatus() -> impl IntoView {
    let params = use_params_map();
    let mach_id = Memo::new(move |_| params.read().get("machID").unwrap_or_default());

    move || view! { <HostStatusPanel mach_id=MachId::new(mach_id.get())/> }
}

#[component]
fn HostStatusPanel(mach_id: MachId) -> impl IntoView {
    let ctx = use_dashboard();
    let vm = HostStatusViewModel::new(Arc::clone(&ctx.api), mach_id);
    let state = RwSignal::new(vm.snapshot());
    let dialog_open = RwSignal::new(false);

    let render = {
        let vm = vm.clone();
        move || {
            let _ = state.try_set(vm.snapshot());
        }
    };
    hold_while_mounted(vm.activate(&GlooScheduler, ctx.settings.intervals, render));

    let on_action = Callback::new({
        let vm = vm.clone();
        move |(action, proc_id): (ProcessAction, ProcId)| {
            let vm = vm.clone();
            spawn_local(async move {
                match vm.run(action, &proc_id).await {
                    Ok(_) => {
                        let _ = state.try_set(vm.snapshot());
                    }
                    Err(err) => log_action_failure(action.label(), &err),
                }
            });
        }
    });

    let on_confirm = Callback::new({
        let vm = vm.clone();
        move |form: NewProcessForm| {
            let vm = vm.clone();
            spawn_local(async move {
                if handle_create_result(vm.submit_new_process(&form).await) {
                    let _ = dialog_open.try_set(false);
                    let _ = state.try_set(vm.snapshot());
                }
            });
        }
    });
    let on_cancel = Callback::new(move |()| dialog_open.set(false));

    let processes = Signal::derive(move || state.with(|s| s.processes.clone()));
    let services = Signal::derive(move || state.with(|s| s.services.clone()));
    let host = Signal::derive(move || state.with(|s| s.host.clone()));
    let title = vm.mach_id().to_string();

    view! {
        <div>
            <h1>"Host " {title}</h1>
            {move || match host.get() {
                Some(host) => view! { <HostSummary host/> }.into_any(),
                None => view! { <Loading what="host details"/> }.into_any(),
            }}

            <div class="toolbar">
                <h2>"Processes"</h2>
                <button class="btn btn-primary" on:click=move |_| dialog_open.set(true)>
                    "New process"
                </button>
            </div>
            <ProcessTable processes on_action/>

            <Show when=move || dialog_open.get()>
                <NewProcessDialog
                    form=vm.new_process_form()
                    services
                    hosts=Signal::derive(Vec::<Host>::new)
                    on_confirm
                    on_cancel
                />
            </Show>
        </div>
    }
}

#[component]
fn HostSummary(host: Host) -> impl IntoView {
    let status = if host.is_alive { "alive" } else { "down" };
    let location = format!("{} / {}", host.host_meta.region, host.host_meta.datacenter);
    let (cpu, load) = host.machine.as_ref().map_or_else(
        || ("\u{2014}".to_string(), "\u{2014}".to_string()),
        |m| {
            let load = m
                .load_avg
                .iter()
                .map(|l| format!("{l:.2}"))
                .collect::<Vec<_>>()
                .join(" ");
            (format!("{:.1}%", m.usage_of_cpu), load)
        },
    );
    let disks = host
        .disks()
        .iter()
        .map(|d| format!("{} {}/{}", d.mount, d.used_size, d.total_size))
        .collect::<Vec<_>>()
        .join(", ");

    view! {
        <div class="stat-cards">
            <StatCard label=host.display_name().to_string() value=status.to_string()/>
            <StatCard label="Public IP" value=host.public_ip.clone()/>
            <StatCard label="Location" value=location/>
            <StatCard label="CPU" value=cpu/>
            <StatCard label="Load average" value=load/>
        </div>
        <p>"Disks: " {disks}</p>
    }
}
