pub mod artifacts;
pub mod scenario;

pub use artifacts::{RunLabel, Verdict, capture_run};
