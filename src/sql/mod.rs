//! Safe SQL builder: identifiers from entity definitions only, values as parameters.

mod builder;
mod filter;
mod fragment;
mod partial_update;
pub mod params;
pub use builder::*;
pub use filter::*;
pub use fragment::*;
pub use params::*;
pub use partial_update::*;
