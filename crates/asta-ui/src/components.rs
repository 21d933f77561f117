mod alert_banners;
mod command_bar;
mod log_panel;
mod status_badge;
mod task_table;
mod task_table_row;

pub use alert_banners::AlertBanners;
pub use command_bar::CommandBar;
pub use log_panel::LogPanel;
pub use status_badge::StatusBadge;
pub use task_table::TaskTable;
pub use task_table_row::TaskTableRow;
