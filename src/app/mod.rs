pub mod error;

pub use error::{PaperdropError, Result};
