//! A headless match: simulated characters driven by real workers
//!
//! Every tick each character applies the command its worker published last, the main agent
//! collects the diamond it stands on, and the new positions are handed back to every worker as a
//! fresh [GameState]. Without a screen or sprites this is the same loop a game would run, which
//! makes it what the CLI `run` command and the integration tests drive.

use std::{sync::Arc, thread, time::Duration};

use anyhow::{bail, Context, Result};
use maze_minimax::GameState;
use parking_lot::RwLock;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use serde::{Deserialize, Serialize};
use types::{GridCoord, Maze, MazeFixture, Move, WalkabilityMatrix};

use crate::{
    planner::BoxedPlanner,
    translator::MovementCommand,
    worker::{AgentHandle, AgentWorker, Character, WorkerOptions},
};

/// How many agents can chase the main agent at once
pub const MAX_ENEMIES: usize = 3;

#[derive(Debug)]
/// A character that moves one cell per command, if the maze lets it
pub struct SimulatedCharacter {
    position: RwLock<GridCoord>,
}

impl SimulatedCharacter {
    #[allow(missing_docs)]
    pub fn new(position: GridCoord) -> Self {
        Self {
            position: RwLock::new(position),
        }
    }

    /// Apply `command`, returning the move made if the character actually moved
    ///
    /// `Up` needs a ladder above, the other directions need a walkable cell. The diagonal ladder
    /// exits move sideways.
    pub fn apply(&self, command: MovementCommand, walkability: &WalkabilityMatrix) -> Option<Move> {
        let m = match command {
            MovementCommand::Up => Move::Up,
            MovementCommand::Down => Move::Down,
            MovementCommand::Left | MovementCommand::UpLeft => Move::Left,
            MovementCommand::Right | MovementCommand::UpRight => Move::Right,
            MovementCommand::None => return None,
        };

        let mut position = self.position.write();
        let target = position.step(m);
        let allowed = match m {
            Move::Up => walkability.is_ladder(target),
            _ => walkability.is_walkable(target),
        };

        if allowed {
            *position = target;
            Some(m)
        } else {
            None
        }
    }
}

impl Character for SimulatedCharacter {
    fn grid_position(&self) -> GridCoord {
        *self.position.read()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Tuning for a headless match
///
/// The defaults (as implemented by [Default]) are as follows:
/// ```
/// use std::time::Duration;
/// use maze_agents::sim::MatchOptions;
///
/// let defaults = MatchOptions::default();
///
/// assert_eq!(defaults.tick, Duration::from_millis(20));
/// assert_eq!(defaults.max_ticks, 3_000);
/// assert_eq!(defaults.diamonds_to_win, 5);
/// assert_eq!(defaults.seed, 0);
/// ```
pub struct MatchOptions {
    /// Time between two ticks
    pub tick: Duration,
    /// The match is called off after this many ticks
    pub max_ticks: usize,
    /// Diamonds the main agent must collect in a regular maze. A filled maze is won once it is
    /// empty
    pub diamonds_to_win: usize,
    /// Seed for where collected diamonds reappear
    pub seed: u64,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(20),
            max_ticks: 3_000,
            diamonds_to_win: 5,
            seed: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// How a match ended
pub enum MatchOutcome {
    /// The main agent collected every diamond it needed
    Won,
    /// An enemy caught the main agent
    Lost,
    /// Neither happened within [MatchOptions::max_ticks]
    TimedOut,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Summary of a finished match
pub struct MatchReport {
    #[allow(missing_docs)]
    pub outcome: MatchOutcome,
    /// Ticks played
    pub ticks: usize,
    /// Diamonds the main agent collected
    pub collected: usize,
    /// Every cell the main agent stood on, in order
    pub trail: Vec<GridCoord>,
}

#[derive(Debug)]
struct Participant {
    character: Arc<SimulatedCharacter>,
    handle: AgentHandle,
}

#[derive(Debug)]
/// A running headless match, see the [module docs](self)
pub struct Match {
    maze: Maze,
    walkability: Arc<WalkabilityMatrix>,
    filled: bool,
    main: Participant,
    enemies: Vec<Participant>,
    state: GameState,
    collected: usize,
    trail: Vec<GridCoord>,
    rng: StdRng,
    options: MatchOptions,
}

impl Match {
    /// Start a worker for the main agent and one per enemy start of `fixture`
    ///
    /// `enemies` must hold exactly one planner per enemy start. Enemy workers never dodge.
    pub fn start(
        fixture: &MazeFixture,
        main: BoxedPlanner,
        enemies: Vec<BoxedPlanner>,
        worker: WorkerOptions,
        options: MatchOptions,
    ) -> Result<Self> {
        if enemies.len() != fixture.enemies.len() {
            bail!(
                "The maze has {} enemy starts but {} enemy planners were given",
                fixture.enemies.len(),
                enemies.len()
            );
        }
        if enemies.len() > MAX_ENEMIES {
            bail!("At most {} enemies are supported", MAX_ENEMIES);
        }

        let walkability = Arc::new(WalkabilityMatrix::compute(&fixture.maze));
        let goals = walkability.goal_locations();
        let state = GameState::new(fixture.start, fixture.enemies.iter().copied(), goals.clone());

        let main = Self::participant(main, fixture.start, &walkability, goals, worker)
            .context("Couldn't start the main agent")?;
        let enemy_worker = WorkerOptions {
            enemy_lookout: None,
            ..worker
        };
        let enemies = enemies
            .into_iter()
            .zip(fixture.enemies.iter())
            .map(|(planner, start)| {
                Self::participant(planner, *start, &walkability, vec![], enemy_worker)
            })
            .collect::<Result<Vec<_>>>()
            .context("Couldn't start an enemy")?;

        let game = Self {
            maze: fixture.maze.clone(),
            walkability,
            filled: fixture.is_filled(),
            main,
            enemies,
            state,
            collected: 0,
            trail: vec![fixture.start],
            rng: StdRng::seed_from_u64(options.seed),
            options,
        };
        game.broadcast_state()?;

        Ok(game)
    }

    fn participant(
        planner: BoxedPlanner,
        start: GridCoord,
        walkability: &Arc<WalkabilityMatrix>,
        goals: Vec<GridCoord>,
        options: WorkerOptions,
    ) -> Result<Participant> {
        let character = Arc::new(SimulatedCharacter::new(start));
        let handle = AgentWorker::spawn(
            planner,
            Arc::clone(&character) as Arc<dyn Character>,
            Arc::clone(walkability),
            goals,
            options,
        )?;

        Ok(Participant { character, handle })
    }

    /// The latest shared state
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// The main agent's worker
    pub fn main_handle(&self) -> &AgentHandle {
        &self.main.handle
    }

    fn broadcast_state(&self) -> Result<()> {
        self.main.handle.update_state(self.state.clone())?;
        for enemy in &self.enemies {
            enemy.handle.update_state(self.state.clone())?;
        }
        Ok(())
    }

    fn broadcast_maze(&self) -> Result<()> {
        let goals = self.walkability.goal_locations();
        self.main
            .handle
            .update_walkability(Arc::clone(&self.walkability))?;
        self.main.handle.update_goals(goals)?;
        for enemy in &self.enemies {
            enemy
                .handle
                .update_walkability(Arc::clone(&self.walkability))?;
        }
        Ok(())
    }

    /// Play one tick: move everybody, collect, check for the end of the match
    pub fn tick(&mut self) -> Result<Option<MatchOutcome>> {
        let main_move = self
            .main
            .character
            .apply(self.main.handle.take_command(), &self.walkability);
        self.state.main = self.main.character.grid_position();
        self.state.set_last_move(0, main_move);
        if main_move.is_some() {
            self.trail.push(self.state.main);
        }

        for (i, enemy) in self.enemies.iter().enumerate() {
            let m = enemy
                .character
                .apply(enemy.handle.take_command(), &self.walkability);
            self.state.set_position(i + 1, enemy.character.grid_position());
            self.state.set_last_move(i + 1, m);
        }

        if self.state.enemies.iter().any(|e| *e == self.state.main) {
            tracing::info!(position = %self.state.main, "caught by an enemy");
            return Ok(Some(MatchOutcome::Lost));
        }

        if self.state.collect_goal(self.state.main) {
            if let Some(outcome) = self.collect()? {
                return Ok(Some(outcome));
            }
        }

        self.broadcast_state()?;
        Ok(None)
    }

    fn collect(&mut self) -> Result<Option<MatchOutcome>> {
        let at = self.state.main;
        self.collected += 1;
        tracing::info!(%at, collected = self.collected, "diamond collected");

        if self.filled {
            self.maze.clear_goal(at)?;
        } else if self.collected < self.options.diamonds_to_win {
            let taken: Vec<GridCoord> = std::iter::once(at)
                .chain(self.state.enemies.iter().copied())
                .collect();
            let candidates: Vec<GridCoord> = self
                .walkability
                .walkable_locations()
                .into_iter()
                .filter(|c| !taken.contains(c))
                .collect();
            let to = *candidates
                .choose(&mut self.rng)
                .context("There is nowhere left to put the diamond")?;

            self.maze.relocate_goal(to)?;
            tracing::debug!(%to, "diamond moved");
        } else {
            return Ok(Some(MatchOutcome::Won));
        }

        self.walkability = Arc::new(WalkabilityMatrix::compute(&self.maze));
        let goals = self.walkability.goal_locations();
        if goals.is_empty() {
            return Ok(Some(MatchOutcome::Won));
        }
        self.state.goals = Arc::new(goals);
        self.broadcast_maze()?;

        Ok(None)
    }

    /// Tick until the match is decided or runs out of ticks, then stop every worker
    pub fn run(mut self) -> Result<MatchReport> {
        let mut outcome = MatchOutcome::TimedOut;
        let mut ticks = 0;

        while ticks < self.options.max_ticks {
            thread::sleep(self.options.tick);
            ticks += 1;

            if let Some(o) = self.tick()? {
                outcome = o;
                break;
            }
        }

        tracing::info!(?outcome, ticks, collected = self.collected, "match over");

        self.main.handle.stop();
        for enemy in &self.enemies {
            enemy.handle.stop();
        }

        Ok(MatchReport {
            outcome,
            ticks,
            collected: self.collected,
            trail: self.trail,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> WalkabilityMatrix {
        let fixture =
            MazeFixture::from_json(include_str!("../../types/fixtures/small.json")).unwrap();
        WalkabilityMatrix::compute(&fixture.maze)
    }

    #[test]
    fn test_walks_onto_walkable_cells_only() {
        let w = small();
        let c = SimulatedCharacter::new(GridCoord::new(3, 1));

        assert_eq!(c.apply(MovementCommand::Left, &w), None);
        assert_eq!(c.apply(MovementCommand::Down, &w), None);
        assert_eq!(c.apply(MovementCommand::Right, &w), Some(Move::Right));
        assert_eq!(c.grid_position(), GridCoord::new(3, 2));
        assert_eq!(c.apply(MovementCommand::None, &w), None);
    }

    #[test]
    fn test_up_needs_a_ladder() {
        let w = small();
        let c = SimulatedCharacter::new(GridCoord::new(3, 2));

        assert_eq!(c.apply(MovementCommand::Up, &w), None);
        c.apply(MovementCommand::Right, &w);
        assert_eq!(c.apply(MovementCommand::Up, &w), Some(Move::Up));
        assert_eq!(c.apply(MovementCommand::Up, &w), Some(Move::Up));
        assert_eq!(c.grid_position(), GridCoord::new(1, 3));
        assert_eq!(c.apply(MovementCommand::Up, &w), None);
    }

    #[test]
    fn test_diagonal_exits_move_sideways() {
        let w = small();
        let c = SimulatedCharacter::new(GridCoord::new(1, 3));

        assert_eq!(c.apply(MovementCommand::UpRight, &w), Some(Move::Right));
        assert_eq!(c.grid_position(), GridCoord::new(1, 4));
        assert_eq!(c.apply(MovementCommand::UpLeft, &w), Some(Move::Left));
        assert_eq!(c.grid_position(), GridCoord::new(1, 3));
    }
}
