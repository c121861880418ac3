pub mod change;
pub mod entry;
pub mod error;
pub mod import;
mod version;

pub use change::*;
pub use entry::*;
pub use error::{Error, Result};
pub use import::*;
pub use version::*;
