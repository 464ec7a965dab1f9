pub mod charts;
pub mod report;
pub mod sources;
pub mod stats;
pub mod table;

pub use table::EnergyTable;
