pub mod engine;
pub mod outcome;

pub use engine::{classify, status_for};
pub use outcome::{Classification, JurisdictionResult};
