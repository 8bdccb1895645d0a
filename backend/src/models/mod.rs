pub mod derived;
pub mod macros;
pub mod period;
pub mod records;
pub mod tables;

pub use derived::*;
pub use period::*;
pub use records::*;
pub use tables::*;
