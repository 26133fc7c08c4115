//! Serial Rules
//!
//! Denominator rules keyed by set and rarity, their canonical lookup index
//! and the layered repository that decides which table a run uses.

mod builtin;
mod canon;
mod index;
mod repository;
mod types;

pub use builtin::*;
pub use canon::*;
pub use index::*;
pub use repository::*;
pub use types::*;
