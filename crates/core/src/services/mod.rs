pub mod feedback_service;
pub mod series_service;
