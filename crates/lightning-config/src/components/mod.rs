//! Configuration components, one per concern.

pub mod completion;
pub mod dialect;
pub mod embedding;
pub mod refresh;

pub use completion::*;
pub use dialect::*;
pub use embedding::*;
pub use refresh::*;
