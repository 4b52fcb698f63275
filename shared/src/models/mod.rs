pub mod character;
pub mod field;
pub mod response;

pub use character::*;
pub use field::*;
pub use response::*;
