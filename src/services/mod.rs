pub mod categories;
pub mod submission;
pub mod uploads;
