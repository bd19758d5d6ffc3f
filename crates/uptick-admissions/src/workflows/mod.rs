pub mod applicants;
pub mod apply;
pub mod dashboard;
