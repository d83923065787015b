use decorum::{Infinite, N64};
use tracing::info_span;

use super::{
    branch_action, leaf, sort_options, AdversarialStrategy, Decision, MinMaxReturn, NodeKind,
    SearchContext, StrategyOptions,
};
use crate::{next_turn, GameModel};

#[derive(Debug, Clone, Copy, Default)]
/// Minimax with alpha-beta pruning
///
/// `alpha` is the best score the maximizer can already force and `beta` the best the minimizers
/// can. As soon as `beta <= alpha` the remaining moves of a node can't change the value at the
/// root and are skipped. The root value is always the same as [Minimax](super::Minimax) would
/// find, only fewer nodes are visited. The options of a node that was cut off only hold the moves
/// that were searched.
pub struct AlphaBeta {
    options: StrategyOptions,
}

impl AlphaBeta {
    #[allow(missing_docs)]
    pub fn new(options: StrategyOptions) -> Self {
        Self { options }
    }

    #[allow(clippy::too_many_arguments)]
    fn minimax<G: GameModel>(
        &self,
        game: &G,
        ctx: &mut SearchContext<G>,
        mut state: G::State,
        depth: usize,
        agent_index: usize,
        player_action: Option<G::Action>,
        mut alpha: N64,
        mut beta: N64,
    ) -> MinMaxReturn<G::Action> {
        ctx.enter();

        if let Some(leaf) = leaf(game, &mut state, depth, player_action) {
            return leaf;
        }
        if let Some(cached) = ctx.lookup(game, &state, agent_index) {
            return cached;
        }

        let maximizing = agent_index == 0;
        let moves = game.legal_moves(&state, agent_index);
        if moves.is_empty() {
            let score = if maximizing {
                game.evaluate(&state, depth, None)
            } else {
                0.0.into()
            };
            return MinMaxReturn::Leaf { score };
        }

        let (next_agent, next_depth) = next_turn(agent_index, game.agent_count(&state), depth);
        let mut options = Vec::with_capacity(moves.len());

        for action in moves {
            let child = game.generate_successor(&state, agent_index, action);
            let result = self.minimax(
                game,
                ctx,
                child,
                next_depth,
                next_agent,
                branch_action(player_action, agent_index, action),
                alpha,
                beta,
            );
            let value = result.score();
            options.push((action, result));

            if maximizing {
                alpha = std::cmp::max(alpha, value);
            } else {
                beta = std::cmp::min(beta, value);
            }

            if beta <= alpha {
                break;
            }
        }

        sort_options(&mut options, maximizing);
        let result = MinMaxReturn::Node {
            kind: if maximizing { NodeKind::Max } else { NodeKind::Min },
            score: options[0].1.score(),
            options,
            agent_index,
        };

        ctx.store(game, &state, agent_index, &result);
        result
    }
}

impl<G: GameModel> AdversarialStrategy<G> for AlphaBeta {
    fn choose_action(
        &self,
        game: &G,
        state: &G::State,
        depth: usize,
        agent_index: usize,
    ) -> Decision<G::Action> {
        info_span!(
            "alpha_beta",
            depth,
            agent_index,
            nodes = tracing::field::Empty,
            chosen_score = tracing::field::Empty,
            chosen_action = tracing::field::Empty,
        )
        .in_scope(|| {
            let mut ctx = SearchContext::new(&self.options);
            let tree = self.minimax(
                game,
                &mut ctx,
                state.clone(),
                depth,
                agent_index,
                None,
                N64::NEG_INFINITY,
                N64::INFINITY,
            );
            let decision = Decision::new(tree, ctx.stats);

            let current_span = tracing::Span::current();
            current_span.record("nodes", decision.stats.nodes);
            current_span.record("chosen_score", format!("{}", decision.value).as_str());
            current_span.record(
                "chosen_action",
                format!("{:?}", decision.action).as_str(),
            );

            decision
        })
    }

    fn name(&self) -> &'static str {
        "alphabeta"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::{test_game::TreeGame, Minimax};

    #[test]
    fn test_prunes_the_second_branch() {
        let game = TreeGame {
            agents: 2,
            branching: 2,
            leaves: vec![3.0, 5.0, 2.0, 9.0],
        };

        let pruned = AlphaBeta::default().choose_action(&game, &vec![], 1, 0);
        let full = Minimax::default().choose_action(&game, &vec![], 1, 0);

        assert_eq!(pruned.value, full.value);
        assert_eq!(pruned.action, Some(0));
        // The 9 leaf is never looked at
        assert_eq!(pruned.stats.nodes, 6);
        assert!(pruned.stats.nodes < full.stats.nodes);
    }

    #[test]
    fn test_same_value_as_minimax_on_deeper_trees() {
        let leaves: Vec<f64> = (0..81).map(|i| ((i * 37 + 11) % 23) as f64).collect();
        let game = TreeGame {
            agents: 2,
            branching: 3,
            leaves,
        };

        let pruned = AlphaBeta::default().choose_action(&game, &vec![], 2, 0);
        let full = Minimax::default().choose_action(&game, &vec![], 2, 0);

        assert_eq!(pruned.value, full.value);
        assert!(pruned.stats.nodes <= full.stats.nodes);
    }
}
