//! Reader for DOOM engine WAD containers and the binary map data inside them.

mod container;
mod error;
mod level;
pub mod map_name;
mod reader;

#[cfg(any(test, feature = "test-util"))]
pub mod test_util;

pub use container::{Lump, MapMarker, Wad, WadKind};
pub use error::{Result, WadError};
pub use level::{Bounds, Level, LevelFormat, Linedef, Sector, Sidedef, Thing, Vertex};
