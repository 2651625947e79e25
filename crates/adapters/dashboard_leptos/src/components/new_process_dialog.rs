//! Modal dialog for creating a process from a service definition.

use leptos::prelude::*;
use tiadmin_domain::form::NewProcessForm;
use tiadmin_domain::host::Host;
use tiadmin_domain::service::Service;

/// Collects a service, optionally a host, and the argument line.
///
/// Picking a service pre-fills its default arguments. Validation is left to
/// the owner of `on_confirm`; cancelling discards the input.
#[component]
pub fn NewProcessDialog(
    /// Starting state; its scope decides whether a host must be picked.
    form: NewProcessForm,
    #[prop(into)] services: Signal<Vec<Service>>,
    #[prop(into)] hosts: Signal<Vec<Host>>,
    on_confirm: Callback<NewProcessForm>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let needs_host = form.needs_host();
    let form = RwSignal::new(form);

    let select_service = move |name: String| {
        services.with_untracked(|services| form.update(|f| f.select_service(&name, services)));
    };

    view! {
        <div class="dialog-backdrop">
            <div class="dialog" role="dialog" aria-modal="true">
                <h3>"New process"</h3>

                <label for="new-process-service">"Service"</label>
                <select
                    id="new-process-service"
                    on:change=move |ev| select_service(event_target_value(&ev))
                >
                    <option value="">"Select a service"</option>
                    <For
                        each=move || services.get()
                        key=|service| service.svc_name.clone()
                        let(service)
                    >
                        <option value=service.svc_name.clone()>{service.svc_name}</option>
                    </For>
                </select>

                <Show when=move || needs_host>
                    <label for="new-process-host">"Host"</label>
                    <select
                        id="new-process-host"
                        on:change=move |ev| {
                            let mach_id = event_target_value(&ev);
                            form.update(|f| f.select_host(&mach_id));
                        }
                    >
                        <option value="">"Select a host"</option>
                        <For
                            each=move || hosts.get()
                            key=|host| host.mach_id.clone()
                            let(host)
                        >
                            <option value=host.mach_id.to_string()>
                                {host.display_name().to_string()}
                            </option>
                        </For>
                    </select>
                </Show>

                <label for="new-process-args">"Arguments"</label>
                <textarea
                    id="new-process-args"
                    rows="3"
                    prop:value=move || form.with(|f| f.args().to_string())
                    on:input=move |ev| form.update(|f| f.set_args(event_target_value(&ev)))
                ></textarea>

                <div class="dialog-actions">
                    <button class="btn" on:click=move |_| on_cancel.run(())>"Cancel"</button>
                    <button
                        class="btn btn-primary"
                        on:click=move |_| on_confirm.run(form.get_untracked())
                    >
                        "Create"
                    </button>
                </div>
            </div>
        </div>
    }
}
