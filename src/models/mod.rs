pub mod diagnosis;
pub mod enums;

pub use diagnosis::*;
pub use enums::*;
