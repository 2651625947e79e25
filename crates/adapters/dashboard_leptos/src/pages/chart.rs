use std::sync::Arc;

use leptos::prelude::*;
use tiadmin_app::view_models::ChartViewModel;
use tiadmin_domain::metrics::PerfSeries;

use super::points_of;
use crate::components::PerfChartView;
use crate::scheduler::GlooScheduler;
use crate::{hold_while_mounted, use_dashboard};

/// TPS, QPS, IOPS and connection count, one strip each.
#[component]
pub fn Chart() -> impl IntoView {
    let ctx = use_dashboard();
    let vm = ChartViewModel::new(Arc::clone(&ctx.api));
    let state = RwSignal::new(vm.snapshot());

    let render = {
        let vm = vm.clone();
        move || {
            let _ = state.try_set(vm.snapshot());
        }
    };
    hold_while_mounted(vm.activate(&GlooScheduler, ctx.settings.intervals, render));

    view! {
        <div>
            <h1>"Performance"</h1>
            {PerfSeries::ALL
                .into_iter()
                .map(|metric| {
                    let points =
                        Signal::derive(move || state.with(|s| points_of(&s.chart, metric)));
                    view! { <PerfChartView name=metric.key() points/> }
                })
                .collect_view()}
        </div>
    }
}
