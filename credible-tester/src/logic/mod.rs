pub mod checks;
pub mod tester;

pub use tester::{LogicTester, ScenarioResult};
