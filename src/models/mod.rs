pub mod finding;
pub mod report;
pub mod scan_record;

pub use finding::*;
pub use report::*;
pub use scan_record::*;
