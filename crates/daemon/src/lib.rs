mod cache;
mod domains;
mod report;
mod sites;
mod utils;

pub use cache::*;
pub use domains::*;
pub use report::*;
pub use sites::*;
pub use utils::*;
