pub mod probability;
pub mod rating;
pub mod result;
pub mod simulator;

pub use probability::*;
pub use rating::*;
pub use result::*;
pub use simulator::*;
