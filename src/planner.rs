use tracing::{debug, info};

use crate::infra::pathfinding::{FrontierSearch, SearchResult};
use crate::infra::Tile;
use crate::state::WorldState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationMode {
    /// Looking for unexplored cells, falling back to the control cell.
    Exploring,
    /// Control reached, heading back to the start cell. Terminal.
    Returning,
}

impl NavigationMode {
    pub fn return_mode(self) -> bool {
        self == NavigationMode::Returning
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub mode: NavigationMode,
    pub result: Option<SearchResult>,
    pub mode_changed: bool,
}

pub struct Planner;

impl Planner {
    #[tracing::instrument(level = "debug", skip(world), fields(tick = world.tick))]
    pub fn decide_action(world: &mut WorldState) -> Decision {
        let mode_changed = Self::update_mode(world);
        let result = FrontierSearch::find_first_step(
            &mut world.map,
            world.rick_pos,
            world.mode.return_mode(),
        );

        match &result {
            Some(found) => debug!(
                "{:?}: heading {} toward {:?} at {} ({} hops)",
                world.mode, found.direction, found.tile, found.target, found.hops
            ),
            None => debug!("{:?}: no reachable goal from {}", world.mode, world.rick_pos),
        }

        if world.mode.return_mode()
            && let Some(route) = world.map.path_to_start(world.rick_pos)
        {
            debug!("Recorded route back to start: {} steps", route.len() - 1);
        }

        Decision {
            mode: world.mode,
            result,
            mode_changed,
        }
    }

    fn update_mode(world: &mut WorldState) -> bool {
        if world.mode == NavigationMode::Exploring && world.current_tile() == Some(Tile::Control) {
            info!("Control reached at {} on tick {}, returning to start", world.rick_pos, world.tick);
            world.mode = NavigationMode::Returning;
            return true;
        }
        false
    }
}
