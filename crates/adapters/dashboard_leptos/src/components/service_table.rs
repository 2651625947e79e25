use leptos::prelude::*;
use tiadmin_domain::service::Service;

#[component]
pub fn ServiceTable(#[prop(into)] services: Signal<Vec<Service>>) -> impl IntoView {
    move || {
        let services = services.get();
        if services.is_empty() {
            return view! { <p>"No services defined."</p> }.into_any();
        }
        view! {
            <table>
                <thead>
                    <tr>
                        <th>"Service"</th>
                        <th>"Version"</th>
                        <th>"Command"</th>
                        <th>"Default args"</th>
                        <th>"Port"</th>
                        <th>"Protocol"</th>
                    </tr>
                </thead>
                <tbody>
                    {services.into_iter().map(|service| {
                        let args = service.args_line();
                        view! {
                            <tr>
                                <td>{service.svc_name}</td>
                                <td>{service.version}</td>
                                <td><code>{service.command}</code></td>
                                <td><code>{args}</code></td>
                                <td>{service.port}</td>
                                <td>{service.protocol}</td>
                            </tr>
                        }
                    }).collect::<Vec<_>>()}
                </tbody>
            </table>
        }
        .into_any()
    }
}
