use tracing::{debug, info, warn};

use crate::infra::Direction;
use crate::infra::game_observer::GameObserver;
use crate::infra::protocol::GameSettings;
use crate::planner::{Decision, NavigationMode};
use crate::state::WorldState;

pub struct DefaultObserver {
    show_map: bool,
}

impl DefaultObserver {
    pub fn new(show_map: bool) -> Self {
        Self { show_map }
    }
}

impl GameObserver for DefaultObserver {
    fn on_game_start(&mut self, settings: &GameSettings) {
        info!("Game started");
        info!("- map size: {}x{}", settings.rows, settings.columns);
        info!("- alarm countdown: {} rounds", settings.alarm_rounds);
    }

    fn on_state_update(&mut self, world: &WorldState, changed_cells: usize) {
        info!(
            "tick: {}, pos: ({}, {}), tile: {:?}, changed: {}",
            world.tick,
            world.rick_pos.x,
            world.rick_pos.y,
            world.current_tile(),
            changed_cells,
        );

        if self.show_map {
            debug!("\n{}", world.map.draw_ascii_map(world.rick_pos));
        }
    }

    fn on_mode_changed(&mut self, mode: NavigationMode, world: &WorldState) {
        info!("Mode changed to {:?} at tick {}", mode, world.tick);
    }

    fn on_action_selected(&mut self, decision: &Decision, _world: &WorldState) {
        if let Some(result) = decision.result {
            info!("action: {}", result.direction);
        }
    }

    fn on_no_move(&mut self, fallback: Direction, world: &WorldState) {
        warn!(
            "No reachable goal from ({}, {}) in {:?} mode, falling back to {}",
            world.rick_pos.x, world.rick_pos.y, world.mode, fallback
        );
    }

    fn on_game_finished(&mut self, turns: u32, world: Option<&WorldState>) {
        info!("Game finished after {} turns", turns);
        if let Some(world) = world {
            info!("Final position: {}, mode: {:?}", world.rick_pos, world.mode);
        }
    }
}
