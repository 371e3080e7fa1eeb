use std::io::{BufRead, Write};
use std::time::Instant;

use tracing::{debug, warn};

use crate::infra::game_observer::GameObserver;
use crate::infra::protocol::{GameSettings, ProtocolError, TurnInput};
use crate::infra::replay::ReplayFile;
use crate::infra::{Direction, Position, Tile};
use crate::planner::Planner;
use crate::state::{Map, WorldState};

pub struct Game<R, W> {
    reader: R,
    writer: W,
    observer: Box<dyn GameObserver>,
    replays_folder: Option<String>,
}

impl<R: BufRead, W: Write> Game<R, W> {
    pub fn new(reader: R, writer: W, observer: impl GameObserver + 'static) -> Self {
        Self {
            reader,
            writer,
            observer: Box::new(observer),
            replays_folder: None,
        }
    }

    pub fn with_replays_folder(mut self, replays_folder: Option<String>) -> Self {
        self.replays_folder = replays_folder;
        self
    }

    /// Play until the input ends. Returns the number of turns played.
    pub fn run(&mut self) -> Result<u32, ProtocolError> {
        let Some(settings) = GameSettings::read(&mut self.reader)? else {
            warn!("Empty input, no session header");
            self.observer.on_game_finished(0, None);
            return Ok(0);
        };
        self.observer.on_game_start(&settings);

        let mut replay_file = self.replays_folder.as_deref().and_then(|folder| {
            ReplayFile::new(folder, &settings)
                .inspect(|replay| debug!("Recording session to {}", replay.path().display()))
                .inspect_err(|err| warn!("Replay recording disabled: {}", err))
                .ok()
        });

        let mut world = WorldState::new(&settings);
        let mut turns = 0;

        while let Some(turn) = TurnInput::read(&mut self.reader, &settings)? {
            let tick_start = Instant::now();

            if let Some(replay) = replay_file.as_mut()
                && let Err(err) = replay.append(&turn)
            {
                warn!("Replay recording stopped: {}", err);
                replay_file = None;
            }

            let changed = world.update(&turn);
            self.observer.on_state_update(&world, changed);

            let decision = Planner::decide_action(&mut world);
            if decision.mode_changed {
                self.observer.on_mode_changed(decision.mode, &world);
            }

            let direction = match decision.result {
                Some(result) => {
                    self.observer.on_action_selected(&decision, &world);
                    result.direction
                }
                None => {
                    let fallback = fallback_direction(&world.map, world.rick_pos);
                    self.observer.on_no_move(fallback, &world);
                    fallback
                }
            };

            writeln!(self.writer, "{}", direction.as_command())?;
            self.writer.flush()?;
            turns += 1;

            let tick_duration = tick_start.elapsed();
            if tick_duration.as_millis() > 100 {
                warn!(
                    "Tick {} took {:.2}ms ({} known cells)",
                    world.tick,
                    tick_duration.as_secs_f64() * 1000.0,
                    world.map.len()
                );
            }
        }

        self.observer.on_game_finished(turns, Some(&world));
        Ok(turns)
    }
}

/// Move used when the search finds nothing: the first known non-wall
/// neighbour in priority order, or `Left` when boxed in.
pub fn fallback_direction(map: &Map, pos: Position) -> Direction {
    map.neighbors(pos, Tile::is_traversable)
        .first()
        .copied()
        .unwrap_or(Direction::Left)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::stats_observer::StatsObserver;
    use crate::state::map::map_from_rows;
    use std::io::Cursor;

    fn play(input: &str) -> (u32, String) {
        let mut output = Vec::new();
        let turns = Game::new(Cursor::new(input), &mut output, StatsObserver::new())
            .run()
            .unwrap();
        (turns, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_round_trip_to_control_and_back() {
        let input = "1 3 5\n0 0\nT.C\n0 1\nT.C\n0 2\nT.C\n0 1\nT.C\n";
        let (turns, output) = play(input);
        assert_eq!(turns, 4);
        assert_eq!(output, "RIGHT\nRIGHT\nLEFT\nLEFT\n");
    }

    #[test]
    fn test_explores_unknown_before_control() {
        let input = "3 3 5\n1 1\n???\n?T?\n???\n1 0\n#??\n.T?\n#??\n";
        let (turns, output) = play(input);
        assert_eq!(turns, 2);
        // Second turn: left column resolved, remaining unknowns are right of T.
        assert_eq!(output, "LEFT\nRIGHT\n");
    }

    #[test]
    fn test_walled_in_falls_back() {
        let (turns, output) = play("3 3 1\n1 1\n###\n#T#\n###\n");
        assert_eq!(turns, 1);
        assert_eq!(output, "LEFT\n");
    }

    #[test]
    fn test_empty_input_plays_nothing() {
        assert_eq!(play(""), (0, String::new()));
        assert_eq!(play("2 2 3\n"), (0, String::new()));
    }

    #[test]
    fn test_truncated_turn_is_an_error() {
        let mut output = Vec::new();
        let result = Game::new(Cursor::new("2 2 3\n0 0\nT.\n"), &mut output, StatsObserver::new()).run();
        assert!(matches!(result, Err(ProtocolError::UnexpectedEof { .. })));
    }

    #[test]
    fn test_fallback_prefers_open_neighbor() {
        let map = map_from_rows(&["T..", "###"]);
        assert_eq!(fallback_direction(&map, Position::new(1, 0)), Direction::Left);
        let map = map_from_rows(&["#.", "#T"]);
        assert_eq!(fallback_direction(&map, Position::new(1, 1)), Direction::Up);
        let map = map_from_rows(&["#"]);
        assert_eq!(fallback_direction(&map, Position::new(0, 0)), Direction::Left);
    }
}
