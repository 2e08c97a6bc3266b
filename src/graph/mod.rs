pub mod model;
pub mod signature;

pub use model::*;
pub use signature::*;
