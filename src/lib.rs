pub mod config;
pub mod infra;
pub mod planner;
pub mod state;

// Re-export commonly used types for convenience
pub use infra::{Direction, FrontierSearch, Game, Position, Tile};
pub use planner::{NavigationMode, Planner};
pub use state::{Map, WorldState};
