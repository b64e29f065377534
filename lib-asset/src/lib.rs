mod catalog;
mod catalogs;
mod effect;
mod geo;
mod init_file;
mod material;
mod prop;
mod tile;

pub use catalog::*;
pub use catalogs::*;
pub use effect::*;
pub use geo::*;
pub use init_file::*;
pub use material::*;
pub use prop::*;
pub use tile::*;
