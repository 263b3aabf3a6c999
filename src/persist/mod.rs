pub mod artifact;
pub mod store;
pub mod wire;

pub use artifact::*;
pub use store::*;
pub use wire::*;
