pub mod aggregate;
pub mod report;

pub use aggregate::*;
pub use report::*;
