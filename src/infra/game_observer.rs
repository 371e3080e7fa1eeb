use crate::infra::Direction;
use crate::infra::protocol::GameSettings;
use crate::planner::{Decision, NavigationMode};
use crate::state::WorldState;

/// Trait for observing game events during execution
pub trait GameObserver {
    /// Called once the session header has been read
    fn on_game_start(&mut self, settings: &GameSettings);

    /// Called after each turn's input has been integrated
    fn on_state_update(&mut self, world: &WorldState, changed_cells: usize);

    /// Called on the turn the navigation mode switches
    fn on_mode_changed(&mut self, mode: NavigationMode, world: &WorldState);

    /// Called when the search produced a move
    fn on_action_selected(&mut self, decision: &Decision, world: &WorldState);

    /// Called when the search found nothing and a fallback move is emitted
    fn on_no_move(&mut self, fallback: Direction, world: &WorldState);

    /// Called when the input ends
    fn on_game_finished(&mut self, turns: u32, world: Option<&WorldState>);
}
