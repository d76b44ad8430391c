pub mod leaflet;
pub mod sink;
pub mod view;

pub use leaflet::*;
pub use sink::*;
pub use view::*;
