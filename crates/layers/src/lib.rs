pub mod assembler;
pub mod marker;
pub mod polygons;
pub mod scene;
pub mod symbology;

pub use assembler::*;
pub use marker::*;
pub use polygons::*;
pub use scene::*;
pub use symbology::*;
