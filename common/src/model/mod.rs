pub mod column;
pub mod dataset;
