//! Process table with start/stop/delete buttons.

use leptos::prelude::*;
use leptos_router::components::A;
use tiadmin_app::view_models::ProcessAction;
use tiadmin_domain::id::ProcId;
use tiadmin_domain::process::Process;

/// A table of processes. Each row offers the lifecycle actions; clicks are
/// reported through `on_action`.
#[component]
pub fn ProcessTable(
    /// The processes to display.
    #[prop(into)]
    processes: Signal<Vec<Process>>,
    /// Invoked with the action and the target process id.
    on_action: Callback<(ProcessAction, ProcId)>,
) -> impl IntoView {
    move || {
        let processes = processes.get();
        if processes.is_empty() {
            view! {
                <p>"No processes found."</p>
            }
            .into_any()
        } else {
            view! {
                <table>
                    <thead>
                        <tr>
                            <th>"Process"</th>
                            <th>"Service"</th>
                            <th>"Host"</th>
                            <th>"Desired"</th>
                            <th>"Current"</th>
                            <th>"Alive"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        {processes.into_iter().map(|process| {
                            view! {
                                <ProcessRow process on_action/>
                            }
                        }).collect::<Vec<_>>()}
                    </tbody>
                </table>
            }
            .into_any()
        }
    }
}

#[component]
fn ProcessRow(process: Process, on_action: Callback<(ProcessAction, ProcId)>) -> impl IntoView {
    let host_href = format!("/dashboard/host-status/{}", process.mach_id);
    let host_label = if process.host_name.is_empty() {
        process.mach_id.to_string()
    } else {
        process.host_name.clone()
    };
    let desired = process.desired_state.label().to_string();
    let current = process.current_state.label().to_string();
    let alive = if process.is_alive { "yes" } else { "no" };

    let id = process.proc_id.clone();
    let fire = move |action: ProcessAction| {
        let id = id.clone();
        move |_| on_action.run((action, id.clone()))
    };

    view! {
        <tr>
            <td>{process.proc_id.to_string()}</td>
            <td>{process.svc_name}</td>
            <td><A href=host_href>{host_label}</A></td>
            <td>{desired}</td>
            <td>{current}</td>
            <td>{alive}</td>
            <td>
                <button class="btn" on:click=fire(ProcessAction::Start)>"Start"</button>
                <button class="btn" on:click=fire(ProcessAction::Stop)>"Stop"</button>
                <button class="btn btn-danger" on:click=fire(ProcessAction::Delete)>
                    "Delete"
                </button>
            </td>
        </tr>
    }
}
