use std::sync::Arc;

use tinyvec::TinyVec;
use types::{GridCoord, Move};

/// Agent positions stored inline for the usual handful of enemies
pub type Positions = TinyVec<[GridCoord; 4]>;

/// What the transposition table is keyed on: the agent to move, the main agent and the enemies
pub type PositionKey = (usize, GridCoord, Positions);

#[derive(Debug, Clone, PartialEq, Eq)]
/// The shared state of an adversarial match
///
/// Agent `0` is the main agent, agent `i >= 1` is `enemies[i - 1]`.
///
/// Successors are built by cloning. The positions live inline in a [TinyVec] and the remaining
/// goals are shared behind an [Arc] until a successor actually collects one, so a clone is cheap
/// for every node of the game tree that doesn't pick up a diamond.
pub struct GameState {
    /// Where the main agent is
    pub main: GridCoord,
    /// Where every enemy is
    pub enemies: Positions,
    /// The diamonds that have not been collected yet
    pub goals: Arc<Vec<GridCoord>>,
    /// How many diamonds the main agent has collected
    pub diamond_count: usize,
    /// Set by [GameState::is_terminal] once no goals are left
    pub win: bool,
    /// Set by [GameState::is_terminal] once an enemy has caught the main agent
    pub lose: bool,
    last_moves: TinyVec<[Option<Move>; 5]>,
}

impl GameState {
    /// Start a state with nobody having moved yet
    pub fn new(
        main: GridCoord,
        enemies: impl IntoIterator<Item = GridCoord>,
        goals: Vec<GridCoord>,
    ) -> Self {
        let enemies: Positions = enemies.into_iter().collect();
        let last_moves = std::iter::repeat(None).take(enemies.len() + 1).collect();

        Self {
            main,
            enemies,
            goals: Arc::new(goals),
            diamond_count: 0,
            win: false,
            lose: false,
            last_moves,
        }
    }

    /// The main agent plus every enemy
    pub fn agent_count(&self) -> usize {
        self.enemies.len() + 1
    }

    /// Position of agent `agent_index`
    ///
    /// # Panics
    ///
    /// If there is no such agent
    pub fn position(&self, agent_index: usize) -> GridCoord {
        if agent_index == 0 {
            self.main
        } else {
            self.enemies[agent_index - 1]
        }
    }

    /// Place agent `agent_index` somewhere else
    pub fn set_position(&mut self, agent_index: usize, to: GridCoord) {
        if agent_index == 0 {
            self.main = to;
        } else {
            self.enemies[agent_index - 1] = to;
        }
    }

    /// The last move agent `agent_index` made, if it has moved at all
    pub fn last_move(&self, agent_index: usize) -> Option<Move> {
        self.last_moves.get(agent_index).copied().flatten()
    }

    /// Record that `agent_index` last moved with `m`
    pub fn set_last_move(&mut self, agent_index: usize, m: Option<Move>) {
        if let Some(slot) = self.last_moves.get_mut(agent_index) {
            *slot = m;
        }
    }

    /// Mark the goal at `at` collected, if there is one
    ///
    /// Returns whether a goal was collected
    pub fn collect_goal(&mut self, at: GridCoord) -> bool {
        if !self.goals.contains(&at) {
            return false;
        }

        Arc::make_mut(&mut self.goals).retain(|g| *g != at);
        self.diamond_count += 1;
        true
    }

    /// Record win/lose and return whether the game is over
    ///
    /// Winning means there are no goals left. Losing means an enemy stands on the main agent.
    pub fn is_terminal(&mut self) -> bool {
        self.win = self.goals.is_empty();
        self.lose = self.enemies.iter().any(|e| *e == self.main);

        self.win || self.lose
    }

    pub(crate) fn key(&self, agent_index: usize) -> PositionKey {
        (agent_index, self.main, self.enemies.clone())
    }
}
