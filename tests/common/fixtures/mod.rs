mod plant;
mod vessels;

// Re-export test fixtures
pub use plant::*;
pub use vessels::*;
