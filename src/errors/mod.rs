pub mod types;

pub use types::SentinelError;
