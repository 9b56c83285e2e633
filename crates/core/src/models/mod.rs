pub mod chart;
pub mod notification;
pub mod pnl;
pub mod query;
pub mod settings;
