pub mod analysis;
pub mod columns;
pub mod config;
pub mod dataset;
pub mod load;
pub mod pipeline;
pub mod report;
pub mod table;
pub mod transform;
pub mod write;
