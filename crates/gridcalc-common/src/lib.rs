pub mod coord;
pub mod error;
pub mod formula;
pub mod text;
pub mod value;

pub use coord::*;
pub use error::*;
pub use formula::*;
pub use value::*;
