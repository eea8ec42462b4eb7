pub mod interval;
pub mod list;
pub mod units;
pub mod view;
