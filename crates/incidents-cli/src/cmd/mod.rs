pub mod completions;
pub mod list;
pub mod report;
