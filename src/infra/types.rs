use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Build a position from the protocol's (row, column) pair.
    pub fn from_row_col(row: i32, col: i32) -> Self {
        Self { x: col, y: row }
    }

    pub fn distance(&self, other: &Position) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    pub fn step(&self, direction: Direction) -> Position {
        let (dx, dy) = direction.delta();
        Position::new(self.x + dx, self.y + dy)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Cardinal moves, declared in search priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Down,
    Right,
    Up,
}

impl Direction {
    /// Neighbour enumeration order. Breadth-first tie-breaking depends on it.
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Down,
        Direction::Right,
        Direction::Up,
    ];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Down => (0, 1),
            Direction::Right => (1, 0),
            Direction::Up => (0, -1),
        }
    }

    pub fn as_command(self) -> &'static str {
        match self {
            Direction::Left => "LEFT",
            Direction::Down => "DOWN",
            Direction::Right => "RIGHT",
            Direction::Up => "UP",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_command())
    }
}

/// Classification of a maze cell as seen in the turn input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tile {
    Unknown,
    Empty,
    Wall,
    Start,
    Control,
    Other(char),
}

impl Tile {
    pub fn as_char(self) -> char {
        match self {
            Tile::Unknown => '?',
            Tile::Empty => '.',
            Tile::Wall => '#',
            Tile::Start => 'T',
            Tile::Control => 'C',
            Tile::Other(c) => c,
        }
    }

    pub fn is_traversable(self) -> bool {
        self != Tile::Wall
    }
}

impl From<char> for Tile {
    fn from(c: char) -> Self {
        match c {
            '?' => Tile::Unknown,
            '.' => Tile::Empty,
            '#' => Tile::Wall,
            'T' => Tile::Start,
            'C' => Tile::Control,
            other => Tile::Other(other),
        }
    }
}
