use rand::Rng;

use crate::enemy;
use crate::error::GameError;
use crate::maze::{step, Dir, Maze, Pos, START};
use crate::rules::Rules;
use crate::spawn;

/// Net outcome of one submitted player move. Rejected moves (wall, or a
/// finished run) come back with `moved == false` and everything else zeroed.
#[derive(Clone, Copy, Debug)]
pub struct TurnResult {
    pub moved: bool,
    pub new_position: Pos,
    pub food_delta: i32,
    pub collected_food: bool,
    pub enemy_contact: bool,
    pub met_guest: bool,
    pub saw_cross: bool,
    pub game_over: bool,
}

impl TurnResult {
    fn rejected_at(pos: Pos) -> Self {
        Self {
            moved: false,
            new_position: pos,
            food_delta: 0,
            collected_food: false,
            enemy_contact: false,
            met_guest: false,
            saw_cross: false,
            game_over: false,
        }
    }
}

/// Parameters for a day that has been requested but not yet committed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DayPlan {
    pub day: u32,
    pub maze_size: usize,
}

/// Answer to an explicit "complete the level" request.
#[derive(Clone, Copy, Debug)]
pub struct LevelComplete {
    pub accepted: bool,
    pub bonus: u32,
    pub prepared: Option<DayPlan>,
}

/// The whole simulation for one play session: the current day's maze and
/// entities plus the run state that survives across days. Presentation
/// layers hold one of these and read derived state after each call.
pub struct Game {
    rules: Rules,
    maze: Maze,
    player: Pos,
    enemies: Vec<Pos>,
    food_items: Vec<Pos>,
    guest: Option<Pos>,
    cross: Option<Pos>,
    food: i32,
    steps: u32,
    current_day: u32,
    success_score: u32,
    game_over: bool,
    victory: bool,
    has_met_guest: bool,
    has_seen_cross: bool,
    pending_day: Option<DayPlan>,
}

impl Game {
    /// Starts a fresh run on day 1 with an easy maze.
    pub fn new(rules: Rules, rng: &mut impl Rng) -> Result<Self, GameError> {
        let first = DayPlan {
            day: 1,
            maze_size: rules.easy_size,
        };
        let mut game = Self {
            maze: Maze::generate(first.maze_size, rng)?,
            player: START,
            enemies: Vec::new(),
            food_items: Vec::new(),
            guest: None,
            cross: None,
            food: rules.starting_food,
            steps: 0,
            current_day: 0,
            success_score: 0,
            game_over: false,
            victory: false,
            has_met_guest: false,
            has_seen_cross: false,
            pending_day: Some(first),
            rules,
        };
        game.commit_day_advance(rng)?;
        Ok(game)
    }

    /// Resolves one player action. Everything happens synchronously in here;
    /// the caller animates toward the returned state at its leisure.
    pub fn submit_move(&mut self, dir: Dir) -> TurnResult {
        let mut result = TurnResult::rejected_at(self.player);
        if self.game_over || self.victory || self.food <= 0 {
            result.game_over = self.game_over;
            return result;
        }

        let target = step(self.player, dir);
        if !self.maze.is_walkable(target) {
            return result;
        }

        let food_before = self.food;
        self.player = target;
        self.steps += 1;
        result.moved = true;
        result.new_position = target;

        self.food -= self.rules.decay_per_turn;

        if let Some(idx) = self.food_items.iter().position(|&p| p == target) {
            self.food_items.swap_remove(idx);
            self.food += self.rules.food_reward;
            result.collected_food = true;
        }

        if self.enemies.contains(&target) {
            self.food -= self.rules.enemy_penalty;
            result.enemy_contact = true;
        }

        if self.guest == Some(target) {
            self.guest = None;
            self.has_met_guest = true;
            result.met_guest = true;
        }
        if self.cross == Some(target) {
            self.cross = None;
            self.has_seen_cross = true;
            result.saw_cross = true;
        }

        result.food_delta = self.food - food_before;

        if self.food <= 0 {
            self.game_over = true;
            result.game_over = true;
            return result;
        }

        enemy::advance(&self.maze, &mut self.enemies, self.player);
        self.success_score += self.rules.score_per_turn;
        result
    }

    /// Explicit completion action: only valid while standing on the exit.
    /// Scores the bonus immediately and prepares (but does not start) the
    /// next day; the caller commits once its transition is done.
    pub fn request_level_complete(&mut self) -> LevelComplete {
        if self.game_over || self.victory || !self.maze.is_exit(self.player) {
            return LevelComplete {
                accepted: false,
                bonus: 0,
                prepared: None,
            };
        }

        let bonus = self.rules.completion_bonus(self.steps);
        self.success_score += bonus;

        if self.current_day >= self.rules.days_to_survive {
            self.victory = true;
            self.pending_day = None;
            return LevelComplete {
                accepted: true,
                bonus,
                prepared: None,
            };
        }

        let plan = DayPlan {
            day: self.current_day + 1,
            maze_size: self.rules.maze_size_for(self.success_score),
        };
        self.pending_day = Some(plan);
        LevelComplete {
            accepted: true,
            bonus,
            prepared: Some(plan),
        }
    }

    /// Second phase of the day advance. Returns Ok(false) when nothing is
    /// pending, so stray calls from the presentation layer are harmless.
    pub fn commit_day_advance(&mut self, rng: &mut impl Rng) -> Result<bool, GameError> {
        let Some(plan) = self.pending_day else {
            return Ok(false);
        };

        self.maze = Maze::generate(plan.maze_size, rng)?;
        self.player = START;
        self.steps = 0;

        // Spawn counts use the day index before this increment, so day 1 is
        // enemy-free and food starts sparse.
        let day_index = self.current_day;
        self.enemies = spawn::place(&self.maze, self.rules.enemy_count(day_index), &[], rng)?;
        let mut taken = self.enemies.clone();
        taken.push(self.maze.exit());
        self.food_items = spawn::place(&self.maze, self.rules.food_count(day_index), &taken, rng)?;
        taken.extend_from_slice(&self.food_items);

        self.current_day = plan.day;
        self.guest = self.spawn_special(self.rules.guest_day, &taken, rng)?;
        if let Some(pos) = self.guest {
            taken.push(pos);
        }
        self.cross = self.spawn_special(self.rules.cross_day, &taken, rng)?;

        self.pending_day = None;
        Ok(true)
    }

    fn spawn_special(
        &self,
        on_day: u32,
        taken: &[Pos],
        rng: &mut impl Rng,
    ) -> Result<Option<Pos>, GameError> {
        if self.current_day != on_day {
            return Ok(None);
        }
        let placed = spawn::place(&self.maze, 1, taken, rng)?;
        Ok(placed.first().copied())
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn is_walkable(&self, pos: Pos) -> bool {
        self.maze.is_walkable(pos)
    }

    pub fn exit_position(&self) -> Pos {
        self.maze.exit()
    }

    pub fn is_exit(&self, pos: Pos) -> bool {
        self.maze.is_exit(pos)
    }

    pub fn player(&self) -> Pos {
        self.player
    }

    pub fn enemies(&self) -> &[Pos] {
        &self.enemies
    }

    pub fn food_items(&self) -> &[Pos] {
        &self.food_items
    }

    pub fn guest(&self) -> Option<Pos> {
        self.guest
    }

    pub fn cross(&self) -> Option<Pos> {
        self.cross
    }

    pub fn food(&self) -> i32 {
        self.food
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    pub fn current_day(&self) -> u32 {
        self.current_day
    }

    pub fn success_score(&self) -> u32 {
        self.success_score
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn is_victory(&self) -> bool {
        self.victory
    }

    pub fn has_met_guest(&self) -> bool {
        self.has_met_guest
    }

    pub fn has_seen_cross(&self) -> bool {
        self.has_seen_cross
    }
}
