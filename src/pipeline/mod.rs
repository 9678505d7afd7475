//! Pipeline module - the cohort preparation stages in dependency order

pub mod columns;
pub mod curate;
pub mod filter;
pub mod loader;
pub mod missing;
pub mod output;
pub mod reduce;
pub mod split;

pub use curate::*;
pub use filter::*;
pub use loader::*;
pub use missing::*;
pub use output::*;
pub use reduce::*;
pub use split::*;
