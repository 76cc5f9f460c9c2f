pub mod bootstrap;
pub mod dashboard;

pub use bootstrap::{ensure_default_admin, merge_stored_origins};
pub use dashboard::{Activity, ChartPoint, DashboardStats, quick_action};
