//! Host table for the services view.

use leptos::prelude::*;
use leptos_router::components::A;
use tiadmin_domain::host::Host;

/// Percentage of `used` over `total`, `0` when nothing is reported.
#[allow(clippy::cast_precision_loss)]
fn percent(used: i64, total: i64) -> f64 {
    if total <= 0 {
        return 0.0;
    }
    used as f64 * 100.0 / total as f64
}

#[component]
pub fn HostTable(#[prop(into)] hosts: Signal<Vec<Host>>) -> impl IntoView {
    move || {
        let hosts = hosts.get();
        if hosts.is_empty() {
            return view! { <p>"No hosts registered."</p> }.into_any();
        }
        view! {
            <table>
                <thead>
                    <tr>
                        <th>"Host"</th>
                        <th>"Public IP"</th>
                        <th>"Region"</th>
                        <th>"Datacenter"</th>
                        <th>"CPU"</th>
                        <th>"Memory"</th>
                        <th>"Alive"</th>
                    </tr>
                </thead>
                <tbody>
                    {hosts.into_iter().map(|host| view! { <HostRow host/> }).collect::<Vec<_>>()}
                </tbody>
            </table>
        }
        .into_any()
    }
}

#[component]
fn HostRow(host: Host) -> impl IntoView {
    let href = format!("/dashboard/host-status/{}", host.mach_id);
    let name = host.display_name().to_string();
    let (cpu, mem) = host.machine.as_ref().map_or_else(
        || ("\u{2014}".to_string(), "\u{2014}".to_string()),
        |m| {
            (
                format!("{:.1}%", m.usage_of_cpu),
                format!("{:.1}%", percent(m.used_mem, m.total_mem)),
            )
        },
    );
    let alive = if host.is_alive { "yes" } else { "no" };

    view! {
        <tr>
            <td><A href=href>{name}</A></td>
            <td>{host.public_ip}</td>
            <td>{host.host_meta.region}</td>
            <td>{host.host_meta.datacenter}</td>
            <td>{cpu}</td>
            <td>{mem}</td>
            <td>{alive}</td>
        </tr>
    }
}
