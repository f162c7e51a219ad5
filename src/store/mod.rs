pub mod file;
pub mod port;
pub mod scans;

pub use file::FileStorage;
pub use port::{MemoryStorage, StoragePort};
pub use scans::{ScanStore, MAX_RECENT};
