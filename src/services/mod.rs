pub mod fetch;
pub mod log;
pub mod store;

mod tests;

pub use fetch::*;
pub use log::*;
pub use store::*;
