use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::GameError;
use crate::maze::{Maze, Pos, START};

/// How many draws we allow per requested entity before declaring the maze
/// too crowded. The source looped forever here.
const ATTEMPTS_PER_ENTITY: usize = 64;

/// Picks `count` distinct walkable cells by rejection sampling over the
/// materialized walkable list. The start cell and everything in `exclude`
/// are never returned.
pub fn place(
    maze: &Maze,
    count: usize,
    exclude: &[Pos],
    rng: &mut impl Rng,
) -> Result<Vec<Pos>, GameError> {
    let open = maze.walkable_cells();
    let mut placed: Vec<Pos> = Vec::with_capacity(count);
    let mut attempts = 0;
    let budget = ATTEMPTS_PER_ENTITY * count.max(1);

    while placed.len() < count {
        if attempts >= budget {
            return Err(GameError::PlacementExhausted {
                placed: placed.len(),
                requested: count,
            });
        }
        attempts += 1;

        let candidate = *open.choose(rng).expect("maze has walkable cells");
        if candidate == START || exclude.contains(&candidate) || placed.contains(&candidate) {
            continue;
        }
        placed.push(candidate);
    }
    Ok(placed)
}
