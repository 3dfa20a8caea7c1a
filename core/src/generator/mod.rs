use crate::*;
pub use solvable::*;

mod solvable;

/// Default number of placements tried before giving up on a configuration.
pub const MAX_ATTEMPTS: u32 = 4000;

pub trait BoardGenerator {
    fn generate(&self, config: &GameConfig) -> Result<Board>;
}
