use tracing::info;

use crate::infra::protocol::GameSettings;
use crate::infra::{Direction, Tile};
use crate::infra::game_observer::GameObserver;
use crate::planner::{Decision, NavigationMode};
use crate::state::WorldState;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub exploring_turns: u32,
    pub returning_turns: u32,
    pub fallback_turns: u32,
    pub control_reached_at: Option<u32>,
    pub alarm_rounds: i32,
    pub known_cells: usize,
    pub unknown_cells: usize,
}

/// Collects per-mode turn counts and reports them when the session ends.
#[derive(Default)]
pub struct StatsObserver {
    stats: SessionStats,
}

impl StatsObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    fn count_turn(&mut self, mode: NavigationMode) {
        match mode {
            NavigationMode::Exploring => self.stats.exploring_turns += 1,
            NavigationMode::Returning => self.stats.returning_turns += 1,
        }
    }
}

impl GameObserver for StatsObserver {
    fn on_game_start(&mut self, settings: &GameSettings) {
        self.stats = SessionStats {
            alarm_rounds: settings.alarm_rounds,
            ..SessionStats::default()
        };
    }

    fn on_state_update(&mut self, world: &WorldState, _changed_cells: usize) {
        self.stats.known_cells = world.map.len();
        self.stats.unknown_cells = world.map.count(Tile::Unknown);
    }

    fn on_mode_changed(&mut self, mode: NavigationMode, world: &WorldState) {
        if mode == NavigationMode::Returning {
            self.stats.control_reached_at = Some(world.tick);
        }
    }

    fn on_action_selected(&mut self, decision: &Decision, _world: &WorldState) {
        self.count_turn(decision.mode);
    }

    fn on_no_move(&mut self, _fallback: Direction, world: &WorldState) {
        self.stats.fallback_turns += 1;
        self.count_turn(world.mode);
    }

    fn on_game_finished(&mut self, turns: u32, _world: Option<&WorldState>) {
        let stats = &self.stats;
        info!(
            turns,
            exploring = stats.exploring_turns,
            returning = stats.returning_turns,
            fallback = stats.fallback_turns,
            "Session summary"
        );
        match stats.control_reached_at {
            Some(tick) => info!(
                "Control reached on tick {}, {} turns spent returning (alarm countdown {})",
                tick, stats.returning_turns, stats.alarm_rounds
            ),
            None => info!("Control never reached"),
        }
        info!(
            "Known cells: {}, still unexplored: {}",
            stats.known_cells, stats.unknown_cells
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::pathfinding::SearchResult;
    use crate::infra::protocol::TurnInput;
    use crate::infra::Position;

    #[test]
    fn test_counts_turns_per_mode() {
        let settings = GameSettings {
            rows: 1,
            columns: 3,
            alarm_rounds: 7,
        };
        let mut world = WorldState::new(&settings);
        world.update(&TurnInput {
            rick_pos: Position::new(0, 0),
            rows: vec!["T.?".to_string()],
        });

        let mut observer = StatsObserver::new();
        observer.on_game_start(&settings);
        observer.on_state_update(&world, 3);

        let decision = Decision {
            mode: NavigationMode::Exploring,
            result: Some(SearchResult {
                direction: Direction::Right,
                target: Position::new(2, 0),
                tile: Tile::Unknown,
                hops: 2,
            }),
            mode_changed: false,
        };
        observer.on_action_selected(&decision, &world);
        world.mode = NavigationMode::Returning;
        observer.on_mode_changed(NavigationMode::Returning, &world);
        observer.on_no_move(Direction::Left, &world);
        observer.on_game_finished(2, Some(&world));

        let stats = observer.stats();
        assert_eq!(stats.exploring_turns, 1);
        assert_eq!(stats.returning_turns, 1);
        assert_eq!(stats.fallback_turns, 1);
        assert_eq!(stats.control_reached_at, Some(1));
        assert_eq!(stats.alarm_rounds, 7);
        assert_eq!(stats.known_cells, 3);
        assert_eq!(stats.unknown_cells, 1);
    }
}
