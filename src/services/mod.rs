//! Services for collecting, aggregating and presenting dashboard data

pub mod aggregator;
pub mod boards;
pub mod collector;
pub mod dashboard;
pub mod presenter;

pub use aggregator::Aggregator;
pub use boards::Boards;
pub use collector::{Collector, DashboardData};
pub use dashboard::DashboardService;
pub use presenter::Presenter;
