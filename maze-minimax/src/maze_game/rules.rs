use std::sync::Arc;

use decorum::{Infinite, N64};
use derivative::Derivative;
use types::{GridCoord, Move, WalkabilityMatrix};

use super::{shortest_distance, EvaluationWeights, GameState, PositionKey};
use crate::GameModel;

#[derive(Derivative, Clone)]
#[derivative(Debug)]
/// Legal moves, successors, terminal checks and evaluation for the ladder maze
///
/// One of these is built per planning cycle. It remembers how far the enemies *really* are from
/// the main agent at that moment, because the evaluation treats a real nearby enemy differently
/// from one that only gets close somewhere down a simulated branch.
pub struct MazeGame {
    #[derivative(Debug = "ignore")]
    walkability: Arc<WalkabilityMatrix>,
    weights: EvaluationWeights,
    real_enemy_distance: Option<usize>,
}

impl MazeGame {
    /// Rules for searching from `root`
    pub fn new(
        walkability: Arc<WalkabilityMatrix>,
        weights: EvaluationWeights,
        root: &GameState,
    ) -> Self {
        let real_enemy_distance = shortest_distance(&walkability, root.main, &root.enemies);

        Self {
            walkability,
            weights,
            real_enemy_distance,
        }
    }

    #[allow(missing_docs)]
    pub fn walkability(&self) -> &WalkabilityMatrix {
        &self.walkability
    }

    /// The moves available from `pos`, in `Left, Right, Down, Up` order
    ///
    /// `Up` needs a ladder above, the other directions need a walkable cell. Off-grid cells are
    /// never walkable. On flat ground the horizontal reversal of `prev_action` is dropped to keep
    /// the tree from oscillating, unless it is the only move left.
    pub fn legal_moves_from(&self, pos: GridCoord, prev_action: Option<Move>) -> Vec<Move> {
        let w = &self.walkability;

        let mut moves: Vec<Move> = Move::all()
            .into_iter()
            .filter(|m| {
                let target = pos.step(*m);
                match m {
                    Move::Up => w.is_ladder(target),
                    _ => w.is_walkable(target),
                }
            })
            .collect();

        if let Some(prev) = prev_action.filter(|p| p.is_horizontal()) {
            if !w.is_ladder(pos) && moves.len() > 1 {
                moves.retain(|m| *m != prev.reverse());
            }
        }

        moves
    }

    /// Score a state for the main agent, see [EvaluationWeights] for the formula
    pub fn evaluation_function(
        &self,
        state: &GameState,
        depth: usize,
        player_action: Option<Move>,
    ) -> N64 {
        if state.lose {
            return N64::NEG_INFINITY;
        }
        if state.win {
            return N64::INFINITY;
        }

        let weights = &self.weights;
        let mut score = 0.0;

        if let Some(d) = shortest_distance(&self.walkability, state.main, &state.enemies) {
            let closeness = 1.0 / (d as f64 + 1.0);
            score -= weights.enemy * closeness;

            if matches!(self.real_enemy_distance, Some(real) if real <= weights.danger_radius) {
                score -= weights.danger * closeness;
            }
        }

        if let Some(d) = shortest_distance(&self.walkability, state.main, &state.goals) {
            score += weights.goal / (d as f64 + 1.0);
        }

        score += weights.collected * state.diamond_count as f64 * (depth as f64 + 1.0);

        if player_action.is_none() {
            score -= weights.idle;
        }

        N64::from(score)
    }
}

impl GameModel for MazeGame {
    type State = GameState;
    type Action = Move;
    type Key = PositionKey;

    fn agent_count(&self, state: &GameState) -> usize {
        state.agent_count()
    }

    fn legal_moves(&self, state: &GameState, agent_index: usize) -> Vec<Move> {
        self.legal_moves_from(state.position(agent_index), state.last_move(agent_index))
    }

    /// Legality is not checked here, `action` is applied as given
    ///
    /// Only the main agent collects diamonds.
    fn generate_successor(&self, state: &GameState, agent_index: usize, action: Move) -> GameState {
        let mut next = state.clone();
        let to = state.position(agent_index).step(action);

        next.set_position(agent_index, to);
        next.set_last_move(agent_index, Some(action));
        if agent_index == 0 {
            next.collect_goal(to);
        }

        next
    }

    fn is_terminal(&self, state: &mut GameState) -> bool {
        state.is_terminal()
    }

    fn evaluate(&self, state: &GameState, depth: usize, player_action: Option<Move>) -> N64 {
        self.evaluation_function(state, depth, player_action)
    }

    fn transposition_key(&self, state: &GameState, agent_index: usize) -> PositionKey {
        state.key(agent_index)
    }
}
