mod host_table;
mod loading;
mod new_process_dialog;
mod perf_chart;
mod process_table;
mod service_table;
mod sidebar;
mod stat_card;

pub use host_table::HostTable;
pub use loading::Loading;
pub use new_process_dialog::NewProcessDialog;
pub use perf_chart::PerfChartView;
pub use process_table::ProcessTable;
pub use service_table::ServiceTable;
pub use sidebar::Sidebar;
pub use stat_card::StatCard;
