//! Catalogs a directory of DOOM WADs: identifies IWADs, surveys PWAD levels,
//! renders automap and text-card images and keeps a browsable JSON index.

pub mod index;
pub mod iwad;
pub mod nfo;
pub mod paths;
pub mod record;
pub mod render;
pub mod report;
pub mod scan;
pub mod shutdown;
pub mod store;
pub mod survey;

pub use index::{CatalogIndex, IndexEntry};
pub use record::{EngineTag, IwadRecord, IwadTag, PwadRecord};
pub use report::{ScanReport, ScanWarning, WarningKind};
pub use scan::{ScanOptions, ScanOutput, scan};
pub use store::{Catalog, CatalogStore, Record};
