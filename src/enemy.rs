use crate::maze::{Maze, Pos};

/// Moves every enemy one greedy step toward the player: whichever axis has
/// the larger absolute distance is chased first, with ties going to the y
/// axis. Enemies resolve in index order; a destination that is a wall, an
/// enemy's previous cell, or a cell already claimed this round leaves the
/// enemy in place.
pub fn advance(maze: &Maze, enemies: &mut Vec<Pos>, player: Pos) {
    let before = enemies.clone();
    let mut after: Vec<Pos> = Vec::with_capacity(before.len());

    for &pos in &before {
        let dx = player.x - pos.x;
        let dy = player.y - pos.y;
        let target = if dx.abs() > dy.abs() {
            Pos::new(pos.x + dx.signum(), pos.y)
        } else {
            Pos::new(pos.x, pos.y + if dy > 0 { 1 } else { -1 })
        };

        if maze.is_walkable(target) && !after.contains(&target) && !before.contains(&target) {
            after.push(target);
        } else {
            after.push(pos);
        }
    }

    *enemies = after;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::{Dir, START};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn open_maze(size: usize) -> Maze {
        // Carved mazes are trees; pinning chase geometry down needs a fully
        // open interior instead.
        Maze::fully_open(size)
    }

    #[test]
    fn chases_along_the_larger_axis() {
        let maze = open_maze(9);
        let mut enemies = vec![Pos::new(6, 2)];
        advance(&maze, &mut enemies, Pos::new(1, 1));
        // |dx| = 5 beats |dy| = 1.
        assert_eq!(enemies[0], Pos::new(5, 2));
    }

    #[test]
    fn axis_ties_move_along_y() {
        let maze = open_maze(9);
        let mut enemies = vec![Pos::new(5, 5)];
        advance(&maze, &mut enemies, Pos::new(1, 1));
        assert_eq!(enemies[0], Pos::new(5, 4));
    }

    #[test]
    fn adjacent_enemy_closes_to_the_player_cell() {
        let maze = open_maze(7);
        let mut enemies = vec![Pos::new(1, 2)];
        advance(&maze, &mut enemies, START);
        assert_eq!(enemies[0], START);
    }

    #[test]
    fn walls_block_the_greedy_step() {
        let mut rng = StdRng::seed_from_u64(11);
        let maze = Maze::generate(7, &mut rng).unwrap();
        // Find an enemy spot whose greedy step toward the start is a wall.
        let blocked = maze.walkable_cells().into_iter().find(|&pos| {
            let dx = START.x - pos.x;
            let dy = START.y - pos.y;
            let target = if dx.abs() > dy.abs() {
                Pos::new(pos.x + dx.signum(), pos.y)
            } else {
                Pos::new(pos.x, pos.y + if dy > 0 { 1 } else { -1 })
            };
            pos != START && !maze.is_walkable(target)
        });
        if let Some(pos) = blocked {
            let mut enemies = vec![pos];
            advance(&maze, &mut enemies, START);
            assert_eq!(enemies[0], pos);
        }
    }

    #[test]
    fn claimed_cells_are_first_come_first_served() {
        let maze = open_maze(9);
        // Both enemies want (4, 1); the second stays put.
        let mut enemies = vec![Pos::new(5, 1), Pos::new(4, 2)];
        advance(&maze, &mut enemies, Pos::new(3, 1));
        assert_eq!(enemies[0], Pos::new(4, 1));
        assert_eq!(enemies[1], Pos::new(4, 2));
    }

    #[test]
    fn occupied_previous_cells_also_block() {
        let maze = open_maze(9);
        // Enemy 1 wants the cell enemy 0 started the round on.
        let mut enemies = vec![Pos::new(3, 1), Pos::new(4, 1)];
        advance(&maze, &mut enemies, Pos::new(1, 1));
        assert_eq!(enemies[0], Pos::new(2, 1));
        assert_eq!(enemies[1], Pos::new(4, 1));
    }

    #[test]
    fn open_path_shrinks_manhattan_distance_every_round() {
        let maze = open_maze(9);
        let player = Pos::new(1, 1);
        let mut enemies = vec![Pos::new(7, 7)];
        let mut last = enemies[0].manhattan(player);
        while enemies[0] != player {
            advance(&maze, &mut enemies, player);
            let now = enemies[0].manhattan(player);
            assert_eq!(now, last - 1);
            last = now;
        }
    }

    #[test]
    fn coordinate_convention_matches_the_chase_math() {
        assert_eq!(Dir::Up.delta(), (0, 1));
        assert_eq!(Dir::Down.delta(), (0, -1));
    }
}
