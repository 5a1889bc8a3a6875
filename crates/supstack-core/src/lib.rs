pub mod actions;
pub mod browse;
pub mod catalog;
pub mod config;
pub mod error;
pub mod export;
pub mod interactions;
pub mod persistence;
pub mod reducer;
pub mod stack;
pub mod state;
pub mod summary;

pub use actions::*;
pub use catalog::*;
pub use error::*;
pub use reducer::*;
pub use stack::*;
pub use state::*;
pub use summary::*;

pub use persistence::*;
