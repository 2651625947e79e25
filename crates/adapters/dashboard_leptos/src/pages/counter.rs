use std::sync::Arc;

use leptos::prelude::*;
use tiadmin_app::view_models::CounterViewModel;

use crate::components::Loading;
use crate::scheduler::GlooScheduler;
use crate::{hold_while_mounted, use_dashboard};

#[component]
pub fn Counter() -> impl IntoView {
    let ctx = use_dashboard();
    let vm = CounterViewModel::new(Arc::clone(&ctx.counter));
    let count = RwSignal::new(vm.snapshot());

    let render = {
        let vm = vm.clone();
        move || {
            let _ = count.try_set(vm.snapshot());
        }
    };
    hold_while_mounted(vm.activate(&GlooScheduler, ctx.settings.intervals, render));

    view! {
        <div>
            <h1>"Counter"</h1>
            {move || match count.get() {
                Some(counter) => view! { <p class="counter">{counter.count}</p> }.into_any(),
                None => view! { <Loading what="the counter"/> }.into_any(),
            }}
        </div>
    }
}
