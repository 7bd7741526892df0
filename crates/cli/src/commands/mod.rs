pub mod extract;
pub mod manifest;
pub mod scan;
pub mod util;

pub use extract::*;
pub use manifest::*;
pub use scan::*;
pub use util::*;
