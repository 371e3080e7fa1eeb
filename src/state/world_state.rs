use tracing::{debug, warn};

use super::Map;
use crate::infra::protocol::{GameSettings, TurnInput};
use crate::infra::{Position, Tile};
use crate::planner::NavigationMode;

/// Everything the bot remembers between turns.
#[derive(Clone, Debug)]
pub struct WorldState {
    pub tick: u32,
    pub alarm_rounds: i32,
    pub map: Map,
    pub rick_pos: Position,
    pub mode: NavigationMode,
    start_pos: Option<Position>,
}

impl WorldState {
    pub fn new(settings: &GameSettings) -> Self {
        Self {
            tick: 0,
            alarm_rounds: settings.alarm_rounds,
            map: Map::new(settings.columns, settings.rows),
            rick_pos: Position::new(0, 0),
            mode: NavigationMode::Exploring,
            start_pos: None,
        }
    }

    /// Start cell, captured on the first turn.
    pub fn start_pos(&self) -> Option<Position> {
        self.start_pos
    }

    pub fn current_tile(&self) -> Option<Tile> {
        self.map.tile(&self.rick_pos)
    }

    /// Integrate one turn of input. Returns how many cells changed classification.
    pub fn update(&mut self, turn: &TurnInput) -> usize {
        self.tick += 1;
        self.rick_pos = turn.rick_pos;

        let changed = self.map.integrate_rows(&turn.rows);
        debug!(tick = self.tick, changed, known = self.map.len(), "Map updated");

        if self.map.cell(&self.rick_pos).is_none() {
            warn!("Rick at {} is outside the visible grid", self.rick_pos);
        }

        if self.start_pos.is_none() {
            self.capture_start();
        }

        changed
    }

    fn capture_start(&mut self) {
        let pos = self.rick_pos;
        let cell = self.map.get_or_create(pos);
        if cell.tile != Tile::Start {
            warn!("Start cell {} is classified as {:?}", pos, cell.tile);
        }
        cell.coming_from = Some(pos);
        cell.steps_to_start = Some(0);
        self.start_pos = Some(pos);
        debug!("Start cell captured at {}", pos);
    }
}
