pub mod teams;

pub use teams::*;
