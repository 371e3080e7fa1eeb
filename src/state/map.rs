use std::collections::{HashMap, HashSet};

use crate::infra::{Direction, Position, Tile};

/// One observed grid cell plus the bookkeeping left behind by searches.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    pub tile: Tile,
    pub coming_from: Option<Position>,
    pub steps_to_start: Option<u32>,
}

impl Cell {
    pub fn new(tile: Tile) -> Self {
        Self {
            tile,
            coming_from: None,
            steps_to_start: None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Map {
    pub width: i32,
    pub height: i32,
    cells: HashMap<Position, Cell>,
}

impl Map {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            cells: HashMap::new(),
        }
    }

    pub fn cell(&self, pos: &Position) -> Option<&Cell> {
        self.cells.get(pos)
    }

    pub fn cell_mut(&mut self, pos: &Position) -> Option<&mut Cell> {
        self.cells.get_mut(pos)
    }

    pub fn tile(&self, pos: &Position) -> Option<Tile> {
        self.cells.get(pos).map(|cell| cell.tile)
    }

    pub fn get_or_create(&mut self, pos: Position) -> &mut Cell {
        self.cells
            .entry(pos)
            .or_insert_with(|| Cell::new(Tile::Unknown))
    }

    /// Record an observation. Returns true when the stored classification changed.
    pub fn update(&mut self, pos: Position, tile: Tile) -> bool {
        match self.cells.get_mut(&pos) {
            None => {
                self.cells.insert(pos, Cell::new(tile));
                true
            }
            Some(cell) if cell.tile != tile => {
                cell.tile = tile;
                true
            }
            Some(_) => false,
        }
    }

    /// Feed one turn's visible rows. Returns how many cells changed.
    pub fn integrate_rows<S: AsRef<str>>(&mut self, rows: &[S]) -> usize {
        let mut changed = 0;
        for (y, row) in rows.iter().enumerate() {
            for (x, c) in row.as_ref().chars().enumerate() {
                if self.update(Position::new(x as i32, y as i32), Tile::from(c)) {
                    changed += 1;
                }
            }
        }
        changed
    }

    /// Directions, in priority order, whose neighbour is known and accepted by `predicate`.
    pub fn neighbors<F>(&self, pos: Position, predicate: F) -> Vec<Direction>
    where
        F: Fn(Tile) -> bool,
    {
        Direction::ALL
            .into_iter()
            .filter(|&direction| {
                self.tile(&pos.step(direction)).is_some_and(&predicate)
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Position, &Cell)> {
        self.cells.iter()
    }

    pub fn count(&self, tile: Tile) -> usize {
        self.cells.values().filter(|cell| cell.tile == tile).count()
    }

    /// Follow `coming_from` links back to the self-referencing start cell.
    pub fn path_to_start(&self, from: Position) -> Option<Vec<Position>> {
        let mut path = vec![from];
        let mut seen = HashSet::from([from]);
        let mut current = from;
        loop {
            let previous = self.cell(&current)?.coming_from?;
            if previous == current {
                return Some(path);
            }
            if !seen.insert(previous) {
                return None;
            }
            path.push(previous);
            current = previous;
        }
    }

    pub fn draw_ascii_map(&self, actor: Position) -> String {
        let mut output = String::new();
        for y in 0..self.height {
            for x in 0..self.width {
                let pos = Position::new(x, y);
                if pos == actor {
                    output.push('@');
                } else {
                    output.push(self.tile(&pos).map_or(' ', Tile::as_char));
                }
            }
            output.push('\n');
        }
        output
    }
}

#[cfg(test)]
pub(crate) fn map_from_rows(rows: &[&str]) -> Map {
    let height = rows.len() as i32;
    let width = rows.iter().map(|row| row.len()).max().unwrap_or(0) as i32;
    let mut map = Map::new(width, height);
    map.integrate_rows(rows);
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_or_create_inserts_unknown() {
        let mut map = Map::new(3, 3);
        let pos = Position::new(1, 1);
        assert_eq!(map.get_or_create(pos).tile, Tile::Unknown);
        map.get_or_create(pos).tile = Tile::Empty;
        assert_eq!(map.get_or_create(pos).tile, Tile::Empty);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_update_replaces_unknown_once() {
        let mut map = map_from_rows(&["?"]);
        let pos = Position::new(0, 0);
        assert!(map.update(pos, Tile::Empty));
        assert!(!map.update(pos, Tile::Empty));
        assert_eq!(map.tile(&pos), Some(Tile::Empty));
    }

    #[test]
    fn test_update_keeps_bookkeeping_on_same_tile() {
        let mut map = map_from_rows(&["T."]);
        let pos = Position::new(1, 0);
        {
            let cell = map.cell_mut(&pos).unwrap();
            cell.coming_from = Some(Position::new(0, 0));
            cell.steps_to_start = Some(1);
        }
        let before = map.cell(&pos).cloned();
        assert_eq!(map.integrate_rows(&["T."]), 0);
        assert_eq!(map.cell(&pos).cloned(), before);
    }

    #[test]
    fn test_integrate_rows_counts_changes() {
        let mut map = map_from_rows(&["???", "?T?"]);
        assert_eq!(map.len(), 6);
        assert_eq!(map.integrate_rows(&["#.?", "?T?"]), 2);
        assert_eq!(map.tile(&Position::new(0, 0)), Some(Tile::Wall));
        assert_eq!(map.tile(&Position::new(1, 0)), Some(Tile::Empty));
        assert_eq!(map.count(Tile::Unknown), 3);
    }

    #[test]
    fn test_neighbors_priority_order() {
        let map = map_from_rows(&["...", "...", "..."]);
        let dirs = map.neighbors(Position::new(1, 1), |_| true);
        assert_eq!(
            dirs,
            vec![Direction::Left, Direction::Down, Direction::Right, Direction::Up]
        );
    }

    #[test]
    fn test_neighbors_filters_missing_and_rejected() {
        let map = map_from_rows(&[".#", "C."]);
        // (0,0): left and up are outside the map, down is C, right is a wall
        let dirs = map.neighbors(Position::new(0, 0), Tile::is_traversable);
        assert_eq!(dirs, vec![Direction::Down]);
        let dirs = map.neighbors(Position::new(0, 0), |tile| tile == Tile::Empty);
        assert!(dirs.is_empty());
    }

    #[test]
    fn test_neighbors_never_duplicates() {
        let map = map_from_rows(&["?.?", ".T.", "?.?"]);
        for (pos, _) in map.iter() {
            let dirs = map.neighbors(*pos, |_| true);
            assert!(dirs.len() <= 4);
            let unique: HashSet<_> = dirs.iter().collect();
            assert_eq!(unique.len(), dirs.len());
        }
    }

    #[test]
    fn test_path_to_start_follows_links() {
        let mut map = map_from_rows(&["T.."]);
        let start = Position::new(0, 0);
        let mid = Position::new(1, 0);
        let end = Position::new(2, 0);
        map.cell_mut(&start).unwrap().coming_from = Some(start);
        map.cell_mut(&mid).unwrap().coming_from = Some(start);
        map.cell_mut(&end).unwrap().coming_from = Some(mid);
        assert_eq!(map.path_to_start(end), Some(vec![end, mid, start]));
    }

    #[test]
    fn test_path_to_start_rejects_loops_and_gaps() {
        let mut map = map_from_rows(&["..."]);
        let a = Position::new(0, 0);
        let b = Position::new(1, 0);
        map.cell_mut(&a).unwrap().coming_from = Some(b);
        map.cell_mut(&b).unwrap().coming_from = Some(a);
        assert_eq!(map.path_to_start(a), None);
        assert_eq!(map.path_to_start(Position::new(2, 0)), None);
    }

    #[test]
    fn test_draw_ascii_map_marks_actor() {
        let map = map_from_rows(&["#?", "T."]);
        assert_eq!(map.draw_ascii_map(Position::new(1, 1)), "#?\nT@\n");
    }
}
