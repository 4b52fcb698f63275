pub mod characters;
pub mod pages;

pub use characters::*;
pub use pages::*;
