use std::sync::Arc;

use maze_minimax::{
    AdversarialStrategy, AlphaBeta, Decision, EvaluationWeights, Expectimax, GameState, MazeGame,
    Minimax, StrategyKind, StrategyOptions,
};
use tracing::info_span;
use types::{GridCoord, Move};

use super::{Planner, PlannerView};
use crate::search::SearchOutcome;

#[derive(Debug, Clone, Copy, PartialEq)]
/// Tuning for the adversarial planner
///
/// The defaults (as implemented by [Default]) are as follows:
/// ```
/// use maze_agents::planner::AdversarialOptions;
///
/// let defaults = AdversarialOptions::default();
///
/// assert_eq!(defaults.depth, 2);
/// assert!(!defaults.transposition_table);
/// assert_eq!(defaults.stochastic_enemy, 1);
/// ```
pub struct AdversarialOptions {
    /// Full rounds to search ahead
    pub depth: usize,
    /// See [StrategyOptions::transposition_table]
    pub transposition_table: bool,
    #[allow(missing_docs)]
    pub weights: EvaluationWeights,
    /// Agent index of the enemy expectimax treats as moving at random
    pub stochastic_enemy: usize,
}

impl Default for AdversarialOptions {
    fn default() -> Self {
        Self {
            depth: 2,
            transposition_table: false,
            weights: EvaluationWeights::default(),
            stochastic_enemy: 1,
        }
    }
}

#[derive(Debug, Clone, Copy)]
/// Picks one move at a time with a game tree search
///
/// Each call searches from the latest match state, with this planner's agent standing where it
/// really is, and returns a two cell path: where the agent is and where the chosen move takes it.
/// The main agent is agent `0` and maximizes. Enemies plan with their own index, which makes them
/// the minimizing side of the same tree.
pub struct AdversarialPlanner {
    strategy: StrategyKind,
    options: AdversarialOptions,
    agent_index: usize,
}

impl AdversarialPlanner {
    #[allow(missing_docs)]
    pub fn new(strategy: StrategyKind, options: AdversarialOptions, agent_index: usize) -> Self {
        Self {
            strategy,
            options,
            agent_index,
        }
    }

    #[allow(missing_docs)]
    pub fn agent_index(&self) -> usize {
        self.agent_index
    }

    /// Run the configured strategy on `state` for this planner's agent
    pub fn decide(&self, game: &MazeGame, state: &GameState) -> Decision<Move> {
        let options = StrategyOptions {
            transposition_table: self.options.transposition_table,
        };
        let depth = self.options.depth;
        let agent = self.agent_index;

        match self.strategy {
            StrategyKind::Minimax => Minimax::new(options).choose_action(game, state, depth, agent),
            StrategyKind::AlphaBeta => {
                AlphaBeta::new(options).choose_action(game, state, depth, agent)
            }
            StrategyKind::Expectimax => Expectimax::new(options, self.options.stochastic_enemy)
                .choose_action(game, state, depth, agent),
        }
    }
}

impl Planner for AdversarialPlanner {
    fn name(&self) -> &'static str {
        self.strategy.name()
    }

    fn plan(&mut self, position: GridCoord, view: &PlannerView) -> Option<SearchOutcome> {
        let shared = match view.state {
            Some(s) => s,
            None => {
                tracing::debug!(agent = self.agent_index, "no match state to search from yet");
                return None;
            }
        };
        if self.agent_index >= shared.agent_count() {
            tracing::warn!(
                agent = self.agent_index,
                agents = shared.agent_count(),
                "planning for an agent that isn't in the match"
            );
            return None;
        }

        let mut state = shared.clone();
        state.set_position(self.agent_index, position);

        info_span!(
            "adversarial_plan",
            strategy = self.strategy.name(),
            agent = self.agent_index,
            position = %position,
            nodes = tracing::field::Empty,
        )
        .in_scope(|| {
            let game = MazeGame::new(
                Arc::clone(view.walkability),
                self.options.weights,
                &state,
            );
            let decision = self.decide(&game, &state);
            tracing::Span::current().record("nodes", decision.stats.nodes);

            let action = decision.action?;
            Some(SearchOutcome {
                path: vec![position, position.step(action)],
                visited: vec![position],
            })
        })
    }
}
