use std::collections::{HashSet, VecDeque};

use crate::infra::{Direction, Position, Tile};
use crate::state::Map;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FrontierNode {
    pos: Position,
    first_direction: Option<Direction>,
    hops: u32,
}

/// First move toward the goal picked by a search, plus the goal itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub direction: Direction,
    pub target: Position,
    pub tile: Tile,
    pub hops: u32,
}

impl SearchResult {
    fn from_node(node: FrontierNode, tile: Tile) -> Option<Self> {
        Some(Self {
            direction: node.first_direction?,
            target: node.pos,
            tile,
            hops: node.hops,
        })
    }
}

pub struct FrontierSearch;

impl FrontierSearch {
    /// Breadth-first search from `origin` for the nearest unknown cell.
    ///
    /// Control cells are never expanded. The last one reached is kept aside
    /// and used as the goal when no unknown cell (or, with `return_mode`, no
    /// start cell) is reachable. Returns `None` when nothing is reachable.
    #[tracing::instrument(level = "trace", skip(map), fields(origin_x = origin.x, origin_y = origin.y))]
    pub fn find_first_step(
        map: &mut Map,
        origin: Position,
        return_mode: bool,
    ) -> Option<SearchResult> {
        let mut frontier = VecDeque::new();
        let mut reached: HashSet<Position> = HashSet::new();
        let mut control_frontier: Option<FrontierNode> = None;

        frontier.push_back(FrontierNode {
            pos: origin,
            first_direction: None,
            hops: 0,
        });
        reached.insert(origin);

        while let Some(current) = frontier.pop_front() {
            let Some(current_cell) = map.cell(&current.pos) else {
                continue;
            };
            let current_tile = current_cell.tile;
            let base_steps = current_cell.steps_to_start.unwrap_or(0);

            if current_tile == Tile::Unknown {
                tracing::trace!(expansions = reached.len(), "Unknown cell found");
                return SearchResult::from_node(current, current_tile);
            }

            if return_mode && current_tile == Tile::Start {
                tracing::trace!(expansions = reached.len(), "Start cell found");
                return SearchResult::from_node(current, current_tile);
            }

            for direction in map.neighbors(current.pos, Tile::is_traversable) {
                let next_pos = current.pos.step(direction);
                if !reached.insert(next_pos) {
                    continue;
                }

                let next_cell = map.get_or_create(next_pos);
                let next_tile = next_cell.tile;
                let shorter = base_steps + 1;
                let known = next_cell.coming_from.and(next_cell.steps_to_start);
                if known.is_none_or(|steps| steps > shorter) {
                    if let Some(previous) = known {
                        tracing::trace!(
                            x = next_pos.x,
                            y = next_pos.y,
                            previous,
                            shorter,
                            "Shorter route to start recorded"
                        );
                    }
                    next_cell.coming_from = Some(current.pos);
                    next_cell.steps_to_start = Some(shorter);
                }

                let next_node = FrontierNode {
                    pos: next_pos,
                    first_direction: current.first_direction.or(Some(direction)),
                    hops: current.hops + 1,
                };

                if next_tile == Tile::Control {
                    // Don't walk through control until the rest is explored
                    control_frontier = Some(next_node);
                } else {
                    frontier.push_back(next_node);
                }
            }
        }

        match control_frontier {
            Some(node) => {
                tracing::trace!(expansions = reached.len(), "Falling back to control cell");
                SearchResult::from_node(node, Tile::Control)
            }
            None => {
                tracing::trace!(expansions = reached.len(), "No reachable goal");
                None
            }
        }
    }
}
