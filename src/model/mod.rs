pub mod language;
pub mod submission;
pub mod verdict;
