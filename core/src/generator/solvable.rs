use super::*;

/// Odd stride between successive trial seeds.
const ATTEMPT_STRIDE: u32 = 7919;

/// Rejection sampler: shuffles the candidate cells, takes the first
/// `mine_count` as mines, and keeps the first layout that leaves a safe route
/// from start to goal.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SolvableBoardGenerator {
    max_attempts: u32,
    mine_cap: CellCount,
}

impl SolvableBoardGenerator {
    pub const fn new(max_attempts: u32, mine_cap: CellCount) -> Self {
        Self {
            max_attempts,
            mine_cap,
        }
    }

    /// Rebuilds a board from the seed reported by [`Board::seed`].
    pub fn regenerate(&self, config: &GameConfig, trial_seed: u32) -> Result<Board> {
        self.search(config, trial_seed)
    }

    /// Clamps `requested` into `[1, min(mine_cap, available - 1)]`, refusing
    /// outright when the candidate pool cannot hold the request.
    pub fn resolve_mine_count(&self, requested: CellCount, available: CellCount) -> Result<CellCount> {
        let too_many = GameError::TooManyMines {
            requested,
            available,
        };
        if requested >= available {
            return Err(too_many);
        }

        let upper = self.mine_cap.min(available - 1);
        let mine_count = requested.min(upper).max(1);
        if mine_count >= available {
            return Err(too_many);
        }

        if mine_count != requested {
            log::warn!("Requested {requested} mines, clamped to {mine_count}");
        }
        Ok(mine_count)
    }

    fn search(&self, config: &GameConfig, base_seed: u32) -> Result<Board> {
        let (cols, rows) = (config.columns, config.rows);
        let goal = config.goal_index();
        let reserved = config.reserved_safe();
        let candidates: Vec<CellIndex> = (0..config.total_cells() as CellIndex)
            .filter(|&index| !reserved.contains(index))
            .collect();
        let mine_count = self.resolve_mine_count(config.mine_count, candidates.len() as CellCount)?;

        let mut pool = candidates.clone();
        let layout = (0..self.max_attempts).find_map(|attempt| {
            let trial_seed = base_seed.wrapping_add(attempt.wrapping_mul(ATTEMPT_STRIDE));
            pool.copy_from_slice(&candidates);
            shuffle(&mut pool, &mut Mulberry32::new(trial_seed));

            let mines: CellSet = pool[..mine_count as usize].iter().copied().collect();
            if shortest_path(START_INDEX, goal, cols, rows, &mines).is_some() {
                log::debug!("Accepted layout on attempt {attempt} with seed {trial_seed}");
                Some((trial_seed, mines))
            } else {
                log::trace!("Rejected layout on attempt {attempt}, start and goal disconnected");
                None
            }
        });

        let (seed, mines) = layout.ok_or(GameError::UnsolvableLayout {
            attempts: self.max_attempts,
        })?;
        Ok(Board::from_layout(seed, (cols, rows), START_INDEX, goal, mines))
    }
}

impl Default for SolvableBoardGenerator {
    fn default() -> Self {
        Self::new(MAX_ATTEMPTS, MAX_MINE_COUNT)
    }
}

impl BoardGenerator for SolvableBoardGenerator {
    fn generate(&self, config: &GameConfig) -> Result<Board> {
        let seed = config.seed.clone().unwrap_or_else(Seed::from_time);
        self.search(config, seed.hashed())
    }
}
