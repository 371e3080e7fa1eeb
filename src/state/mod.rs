pub(crate) mod map;
mod world_state;

pub use map::{Cell, Map};
pub use world_state::WorldState;
