pub mod aircraft;
pub mod error;
pub mod feature;
pub mod frontline;
pub mod sanitize;

pub use aircraft::*;
pub use error::*;
pub use feature::*;
pub use frontline::*;
pub use sanitize::*;
