pub mod health;
pub mod scans;
pub mod status;
pub mod tools;
