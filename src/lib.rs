mod backend;
mod context;
mod geom;
mod interval;
mod paint;
mod path;
mod prim;
mod scan;

pub use backend::*;
pub use context::*;
pub use geom::*;
pub use interval::*;
pub use paint::*;
pub use path::*;
pub use prim::*;
pub use scan::*;
