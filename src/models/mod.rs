pub mod food;
pub mod outcome;
pub mod request;
pub mod user;

pub use outcome::*;
