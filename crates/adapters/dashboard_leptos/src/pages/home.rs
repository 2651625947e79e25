use std::sync::Arc;

use leptos::prelude::*;
use tiadmin_app::view_models::HomeViewModel;
use tiadmin_domain::metrics::PerfSeries;

use super::points_of;
use crate::components::{PerfChartView, ServiceTable, StatCard};
use crate::scheduler::GlooScheduler;
use crate::{hold_while_mounted, use_dashboard};

#[component]
pub fn Home() -> impl IntoView {
    let ctx = use_dashboard();
    let vm = HomeViewModel::new(Arc::clone(&ctx.api));
    let state = RwSignal::new(vm.snapshot());

    let render = {
        let vm = vm.clone();
        move || {
            let _ = state.try_set(vm.snapshot());
        }
    };
    hold_while_mounted(vm.activate(&GlooScheduler, ctx.settings.intervals, render));

    let nodes = Signal::derive(move || state.with(|s| s.num_of_nodes.to_string()));
    let storage = Signal::derive(move || {
        state.with(|s| {
            format!(
                "{} / {} ({:.1}%)",
                s.storage.usage,
                s.storage.capacity,
                s.storage.percent()
            )
        })
    });
    let tps = Signal::derive(move || state.with(|s| points_of(&s.tps, PerfSeries::Tps)));
    let services = Signal::derive(move || state.with(|s| s.services.clone()));

    view! {
        <div>
            <h1>"Home"</h1>
            <div class="stat-cards">
                <StatCard label="Alive nodes" value=nodes/>
                <StatCard label="Storage used / capacity" value=storage/>
            </div>
            <PerfChartView name=PerfSeries::Tps.key() points=tps/>
            <h2>"Services"</h2>
            <ServiceTable services/>
        </div>
    }
}
