pub mod dashboard;
pub mod data;
pub mod filter;
pub mod recap;
pub mod report;
pub mod summary;

pub use dashboard::{render, DashboardView};
pub use data::{load_table, Rental, Table};
pub use filter::{filter, DateRange};
