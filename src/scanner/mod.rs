pub mod catalog;
pub mod executor;
pub mod mock;
pub mod submit;

pub use catalog::{registered_tools, resolve_tool, ToolSpec};
pub use executor::{ScanExecutor, ScanJob, ScanOutcome};
pub use mock::MockExecutor;
pub use submit::{SubmissionFlow, SubmitRequest};
