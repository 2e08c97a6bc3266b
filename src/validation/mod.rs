pub mod apply;
pub mod client;
pub mod outcome;
pub mod reconcile;
pub mod scheduler;

pub use apply::*;
pub use client::*;
pub use outcome::*;
pub use reconcile::*;
pub use scheduler::*;
