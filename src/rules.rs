/// Gameplay constants, collected in one place so every tunable the turn
/// engine and day controller consume has a name.
#[derive(Clone, Debug)]
pub struct Rules {
    pub starting_food: i32,
    pub decay_per_turn: i32,
    pub food_reward: i32,
    pub enemy_penalty: i32,
    pub enemy_cap: usize,
    pub food_cap: usize,
    pub score_per_turn: u32,
    pub fast_steps: u32,
    pub fast_bonus: u32,
    pub steady_steps: u32,
    pub steady_bonus: u32,
    pub slow_bonus: u32,
    pub easy_size: usize,
    pub medium_size: usize,
    pub hard_size: usize,
    pub medium_threshold: u32,
    pub hard_threshold: u32,
    pub days_to_survive: u32,
    pub guest_day: u32,
    pub cross_day: u32,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            starting_food: 100,
            decay_per_turn: 3,
            food_reward: 30,
            enemy_penalty: 30,
            enemy_cap: 5,
            food_cap: 10,
            score_per_turn: 1,
            fast_steps: 10,
            fast_bonus: 5,
            steady_steps: 20,
            steady_bonus: 3,
            slow_bonus: 1,
            easy_size: 7,
            medium_size: 10,
            hard_size: 15,
            medium_threshold: 5,
            hard_threshold: 10,
            days_to_survive: 10,
            guest_day: 5,
            cross_day: 9,
        }
    }
}

impl Rules {
    /// Maze size for the next day, a non-decreasing step function of the
    /// cumulative success score.
    pub fn maze_size_for(&self, success_score: u32) -> usize {
        if success_score > self.hard_threshold {
            self.hard_size
        } else if success_score > self.medium_threshold {
            self.medium_size
        } else {
            self.easy_size
        }
    }

    /// Completion bonus: fewer steps, more points.
    pub fn completion_bonus(&self, steps: u32) -> u32 {
        if steps <= self.fast_steps {
            self.fast_bonus
        } else if steps <= self.steady_steps {
            self.steady_bonus
        } else {
            self.slow_bonus
        }
    }

    pub fn enemy_count(&self, day_index: u32) -> usize {
        (day_index as usize).min(self.enemy_cap)
    }

    pub fn food_count(&self, day_index: u32) -> usize {
        (day_index as usize + 2).min(self.food_cap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_tiers_follow_score_thresholds() {
        let rules = Rules::default();
        assert_eq!(rules.maze_size_for(3), 7);
        assert_eq!(rules.maze_size_for(5), 7);
        assert_eq!(rules.maze_size_for(6), 10);
        assert_eq!(rules.maze_size_for(10), 10);
        assert_eq!(rules.maze_size_for(11), 15);
        assert_eq!(rules.maze_size_for(12), 15);
    }

    #[test]
    fn completion_bonus_rewards_short_runs() {
        let rules = Rules::default();
        assert_eq!(rules.completion_bonus(1), 5);
        assert_eq!(rules.completion_bonus(10), 5);
        assert_eq!(rules.completion_bonus(11), 3);
        assert_eq!(rules.completion_bonus(20), 3);
        assert_eq!(rules.completion_bonus(21), 1);
        assert_eq!(rules.completion_bonus(500), 1);
    }

    #[test]
    fn entity_counts_scale_with_day_up_to_the_caps() {
        let rules = Rules::default();
        assert_eq!(rules.enemy_count(0), 0);
        assert_eq!(rules.enemy_count(3), 3);
        assert_eq!(rules.enemy_count(9), 5);
        assert_eq!(rules.food_count(0), 2);
        assert_eq!(rules.food_count(7), 9);
        assert_eq!(rules.food_count(20), 10);
    }
}
