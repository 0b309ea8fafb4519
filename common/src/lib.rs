pub mod error;
pub mod pagedir;
pub mod persist;
pub mod tokenizer;

mod counters;
mod index;

pub use counters::*;
pub use error::IndexError;
pub use index::*;
