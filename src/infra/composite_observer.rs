use crate::infra::Direction;
use crate::infra::game_observer::GameObserver;
use crate::infra::protocol::GameSettings;
use crate::planner::{Decision, NavigationMode};
use crate::state::WorldState;

pub struct CompositeObserver {
    observers: Vec<Box<dyn GameObserver>>,
}

impl CompositeObserver {
    pub fn new(observers: Vec<Box<dyn GameObserver>>) -> Self {
        Self { observers }
    }
}

impl GameObserver for CompositeObserver {
    fn on_game_start(&mut self, settings: &GameSettings) {
        for observer in &mut self.observers {
            observer.on_game_start(settings);
        }
    }

    fn on_state_update(&mut self, world: &WorldState, changed_cells: usize) {
        for observer in &mut self.observers {
            observer.on_state_update(world, changed_cells);
        }
    }

    fn on_mode_changed(&mut self, mode: NavigationMode, world: &WorldState) {
        for observer in &mut self.observers {
            observer.on_mode_changed(mode, world);
        }
    }

    fn on_action_selected(&mut self, decision: &Decision, world: &WorldState) {
        for observer in &mut self.observers {
            observer.on_action_selected(decision, world);
        }
    }

    fn on_no_move(&mut self, fallback: Direction, world: &WorldState) {
        for observer in &mut self.observers {
            observer.on_no_move(fallback, world);
        }
    }

    fn on_game_finished(&mut self, turns: u32, world: Option<&WorldState>) {
        for observer in &mut self.observers {
            observer.on_game_finished(turns, world);
        }
    }
}
