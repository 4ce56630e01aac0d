pub mod error;
pub mod ranking;
pub mod types;

pub use error::*;
pub use ranking::*;
pub use types::*;
