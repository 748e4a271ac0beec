pub mod reports;
pub mod scenario;
mod util;

pub use util::{FailureArtifacts, artifacts_dir, split_csv};
