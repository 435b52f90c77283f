pub mod dates;
pub mod error;
pub mod filter;
pub mod masks;
