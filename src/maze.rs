use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::VecDeque;

use crate::error::GameError;

/// Grid-aligned position. Signed so that neighbor arithmetic can step off the
/// grid and let `is_walkable` reject it, instead of underflowing.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Pos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn manhattan(self, other: Pos) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Dir {
    Up,
    Down,
    Left,
    Right,
}

impl Dir {
    pub fn delta(self) -> (i32, i32) {
        match self {
            Dir::Up => (0, 1),
            Dir::Down => (0, -1),
            Dir::Left => (-1, 0),
            Dir::Right => (1, 0),
        }
    }
}

pub fn step(pos: Pos, dir: Dir) -> Pos {
    let (dx, dy) = dir.delta();
    Pos::new(pos.x + dx, pos.y + dy)
}

/// Cell the player starts every day on. Generation guarantees it is walkable.
pub const START: Pos = Pos::new(1, 1);

/// Square maze, `true` = wall. Generated once per day and never mutated after.
pub struct Maze {
    size: usize,
    walls: Vec<Vec<bool>>,
    exit: Pos,
}

impl Maze {
    /// Carves a perfect maze of the given size with recursive backtracking,
    /// run on an explicit stack so large sizes cannot blow the call stack,
    /// then picks a random walkable exit away from the start.
    pub fn generate(size: usize, rng: &mut impl Rng) -> Result<Self, GameError> {
        if size < 3 {
            return Err(GameError::InvalidConfiguration { size });
        }

        let mut walls = vec![vec![true; size]; size];
        walls[START.y as usize][START.x as usize] = false;
        let mut stack = vec![START];

        while let Some(&pos) = stack.last() {
            let mut dirs = [Dir::Up, Dir::Right, Dir::Down, Dir::Left];
            dirs.shuffle(rng);

            let mut advanced = false;
            for dir in dirs {
                let (dx, dy) = dir.delta();
                let next = Pos::new(pos.x + dx * 2, pos.y + dy * 2);
                if !in_bounds(next, size) || !walls[next.y as usize][next.x as usize] {
                    continue;
                }
                walls[(pos.y + dy) as usize][(pos.x + dx) as usize] = false;
                walls[next.y as usize][next.x as usize] = false;
                stack.push(next);
                advanced = true;
                break;
            }
            if !advanced {
                stack.pop();
            }
        }

        let mut maze = Self {
            size,
            walls,
            exit: START,
        };
        let open = maze.walkable_cells();
        if open.len() < 2 {
            // A 3x3 grid carves nothing beyond the start cell, so no exit
            // distinct from it can exist.
            return Err(GameError::InvalidConfiguration { size });
        }
        loop {
            let candidate = *open.choose(rng).expect("carved maze has open cells");
            if candidate != START {
                maze.exit = candidate;
                break;
            }
        }
        Ok(maze)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_walkable(&self, pos: Pos) -> bool {
        in_bounds(pos, self.size) && !self.walls[pos.y as usize][pos.x as usize]
    }

    pub fn exit(&self) -> Pos {
        self.exit
    }

    pub fn is_exit(&self, pos: Pos) -> bool {
        pos == self.exit
    }

    pub fn walkable_cells(&self) -> Vec<Pos> {
        let mut cells = Vec::new();
        for y in 0..self.size {
            for x in 0..self.size {
                if !self.walls[y][x] {
                    cells.push(Pos::new(x as i32, y as i32));
                }
            }
        }
        cells
    }

    /// Every cell reachable from `from` with 4-directional moves.
    pub fn reachable_from(&self, from: Pos) -> Vec<Pos> {
        let mut seen = vec![vec![false; self.size]; self.size];
        let mut out = Vec::new();
        let mut queue = VecDeque::new();
        if !self.is_walkable(from) {
            return out;
        }
        seen[from.y as usize][from.x as usize] = true;
        queue.push_back(from);
        while let Some(pos) = queue.pop_front() {
            out.push(pos);
            for dir in [Dir::Up, Dir::Down, Dir::Left, Dir::Right] {
                let next = step(pos, dir);
                if !self.is_walkable(next) || seen[next.y as usize][next.x as usize] {
                    continue;
                }
                seen[next.y as usize][next.x as usize] = true;
                queue.push_back(next);
            }
        }
        out
    }
}

#[cfg(test)]
impl Maze {
    /// Test-only grid with every interior cell open and the exit in the far
    /// corner, for pinning down movement geometry without carving.
    pub(crate) fn fully_open(size: usize) -> Self {
        let mut walls = vec![vec![true; size]; size];
        for row in walls.iter_mut().take(size - 1).skip(1) {
            for cell in row.iter_mut().take(size - 1).skip(1) {
                *cell = false;
            }
        }
        Self {
            size,
            walls,
            exit: Pos::new(size as i32 - 2, size as i32 - 2),
        }
    }
}

fn in_bounds(pos: Pos, size: usize) -> bool {
    pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < size && (pos.y as usize) < size
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn rejects_tiny_sizes() {
        let mut rng = StdRng::seed_from_u64(1);
        // Size 3 carves a single cell and therefore cannot host an exit.
        for size in 0..4 {
            assert_eq!(
                Maze::generate(size, &mut rng).err(),
                Some(GameError::InvalidConfiguration { size })
            );
        }
        assert!(Maze::generate(4, &mut rng).is_ok());
    }

    #[test]
    fn start_is_walkable_and_exit_is_elsewhere() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let maze = Maze::generate(7, &mut rng).unwrap();
            assert!(maze.is_walkable(START));
            assert!(maze.is_walkable(maze.exit()));
            assert_ne!(maze.exit(), START);
            assert!(maze.is_exit(maze.exit()));
            assert!(!maze.is_exit(START));
        }
    }

    #[test]
    fn every_walkable_cell_is_reachable_from_start() {
        for size in [5, 7, 10, 15, 25] {
            let mut rng = StdRng::seed_from_u64(size as u64);
            let maze = Maze::generate(size, &mut rng).unwrap();
            let open = maze.walkable_cells();
            let reached = maze.reachable_from(START);
            assert_eq!(reached.len(), open.len(), "size {size}");
        }
    }

    #[test]
    fn carved_maze_is_perfect() {
        // A spanning tree over the walkable cells has exactly one fewer
        // adjacency edge than it has cells.
        for size in [5, 7, 11, 15] {
            let mut rng = StdRng::seed_from_u64(100 + size as u64);
            let maze = Maze::generate(size, &mut rng).unwrap();
            let open = maze.walkable_cells();
            let mut edges = 0;
            for &pos in &open {
                for dir in [Dir::Right, Dir::Up] {
                    if maze.is_walkable(step(pos, dir)) {
                        edges += 1;
                    }
                }
            }
            assert_eq!(edges, open.len() - 1, "size {size}");
        }
    }

    #[test]
    fn out_of_bounds_is_never_walkable() {
        let mut rng = StdRng::seed_from_u64(7);
        let maze = Maze::generate(7, &mut rng).unwrap();
        assert!(!maze.is_walkable(Pos::new(-1, 1)));
        assert!(!maze.is_walkable(Pos::new(1, -1)));
        assert!(!maze.is_walkable(Pos::new(7, 1)));
        assert!(!maze.is_walkable(Pos::new(1, 7)));
    }

    #[test]
    fn generation_is_deterministic_for_a_seed() {
        let maze_a = Maze::generate(9, &mut StdRng::seed_from_u64(42)).unwrap();
        let maze_b = Maze::generate(9, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(maze_a.walkable_cells(), maze_b.walkable_cells());
        assert_eq!(maze_a.exit(), maze_b.exit());
    }
}
