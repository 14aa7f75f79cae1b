pub mod capture;
pub mod input;

pub use capture::*;
pub use input::*;
