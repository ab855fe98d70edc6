mod client;
pub mod domain;
pub mod records;
pub mod report;

pub use client::*;
pub use records::RecordTable;
