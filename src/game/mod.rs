pub mod combat;
pub mod geometry;
pub mod life;
pub mod movement;
pub mod session;
pub mod spawner;
pub mod tuning;
pub mod world;

pub use life::Phase;
pub use session::{InputSnapshot, RunSummary, Session, TickOutcome};
