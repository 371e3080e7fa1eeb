mod composite_observer;
mod default_observer;
pub mod game;
mod game_observer;
pub mod pathfinding;
pub mod protocol;
mod replay;
mod stats_observer;
mod types;

pub use composite_observer::CompositeObserver;
pub use default_observer::DefaultObserver;
pub use game::Game;
pub use game_observer::GameObserver;
pub use pathfinding::{FrontierSearch, SearchResult};
pub use protocol::{GameSettings, ProtocolError, TurnInput};
pub use replay::ReplayFile;
pub use stats_observer::{SessionStats, StatsObserver};
pub use types::{Direction, Position, Tile};
