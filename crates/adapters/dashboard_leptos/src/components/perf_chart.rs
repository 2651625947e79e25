//! Live metric strip rendered with `leptos-chartistry`.

use leptos::prelude::*;
use leptos_chartistry::*;
use tiadmin_domain::chart::ChartPoint;

#[allow(clippy::cast_precision_loss)]
fn tick_x(point: &ChartPoint) -> f64 {
    point.x as f64
}

/// One sliding-window series as a line chart. The x axis is the sample
/// tick, so the strip scrolls as the window moves.
#[component]
pub fn PerfChartView(
    /// Legend and heading, e.g. `"TPS"`.
    name: &'static str,
    /// The window's points, oldest first.
    #[prop(into)]
    points: Signal<Vec<ChartPoint>>,
) -> impl IntoView {
    let series = Series::new(tick_x).line(Line::new(|p: &ChartPoint| p.y).with_name(name));
    let inner = vec![
        AxisMarker::left_edge().into_inner(),
        AxisMarker::bottom_edge().into_inner(),
        YGridLine::default().into_inner(),
        XGuideLine::over_data().into_inner(),
    ];
    view! {
        <div class="perf-chart">
            <h4>{name}</h4>
            <Chart
                aspect_ratio=AspectRatio::from_env_width_apply_ratio(4.0)
                left=TickLabels::aligned_floats()
                bottom=TickLabels::aligned_floats()
                inner=inner
                tooltip=Tooltip::left_cursor()
                series=series
                data=points
            />
        </div>
    }
}
