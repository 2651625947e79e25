use std::sync::Arc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use tiadmin_app::view_models::{ProcessAction, ServicesViewModel};
use tiadmin_domain::form::NewProcessForm;
use tiadmin_domain::id::ProcId;

use super::{handle_create_result, log_action_failure};
use crate::components::{HostTable, NewProcessDialog, ProcessTable, ServiceTable};
use crate::scheduler::GlooScheduler;
use crate::{hold_while_mounted, use_dashboard};

/// Every service, every process (filterable by service) and every host.
#[component]
pub fn Services() -> impl IntoView {
    let ctx = use_dashboard();
    let vm = ServicesViewModel::new(Arc::clone(&ctx.api));
    let state = RwSignal::new(vm.snapshot());
    let filter = RwSignal::new(String::new());
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

    let services = Signal::derive(move || state.with(|s| s.services.clone()));
    let hosts = Signal::derive(move || state.with(|s| s.hosts.clone()));
    let processes = Signal::derive(move || {
        let svc_name = filter.get();
        state.with(|s| s.filtered_processes(&svc_name))
    });

    view! {
        <div>
            <h1>"Services"</h1>
            <ServiceTable services/>

            <div class="toolbar">
                <h2>"Processes"</h2>
                <select on:change=move |ev| filter.set(event_target_value(&ev))>
                    <option value="">"All services"</option>
                    <For
                        each=move || services.get()
                        key=|service| service.svc_name.clone()
                        let(service)
                    >
                        <option value=service.svc_name.clone()>{service.svc_name}</option>
                    </For>
                </select>
                <button class="btn btn-primary" on:click=move |_| dialog_open.set(true)>
                    "New process"
                </button>
            </div>
            <ProcessTable processes on_action/>

            <h2>"Hosts"</h2>
            <HostTable hosts/>

            <Show when=move || dialog_open.get()>
                <NewProcessDialog
                    form=vm.new_process_form()
                    services
                    hosts
                    on_confirm
                    on_cancel
                />
            </Show>
        </div>
    }
}
