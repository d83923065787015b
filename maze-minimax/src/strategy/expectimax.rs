use decorum::{Infinite, N64};
use itertools::Itertools;
use tracing::info_span;

use super::{
    branch_action, leaf, sort_options, AdversarialStrategy, Decision, MinMaxReturn, NodeKind,
    SearchContext, StrategyOptions,
};
use crate::{next_turn, GameModel};

/// Uniform probabilities over `actions`
///
/// The probabilities sum to one, or the list is empty when there are no actions.
///
/// ```rust
/// use maze_minimax::chance_probabilities;
/// use types::Move;
///
/// let probabilities = chance_probabilities(&[Move::Left, Move::Right, Move::Up]);
/// assert_eq!(
///     probabilities,
///     vec![(Move::Left, 1.0 / 3.0), (Move::Right, 1.0 / 3.0), (Move::Up, 1.0 / 3.0)]
/// );
/// ```
pub fn chance_probabilities<A: Copy>(actions: &[A]) -> Vec<(A, f64)> {
    let p = 1.0 / actions.len() as f64;
    actions.iter().map(|a| (*a, p)).collect()
}

/// Probability weighted average of the children scores
///
/// A branch that can end in both a win and a loss is scored as a loss.
fn expected_value(weighted: impl Iterator<Item = (f64, N64)>) -> N64 {
    let mut total = 0.0;
    let mut can_win = false;

    for (p, score) in weighted {
        if score == N64::NEG_INFINITY {
            return N64::NEG_INFINITY;
        }
        if score == N64::INFINITY {
            can_win = true;
        } else {
            total += p * score.into_inner();
        }
    }

    if can_win {
        N64::INFINITY
    } else {
        N64::from(total)
    }
}

#[derive(Debug, Clone, Copy)]
/// Expectimax: agent `0` maximizes, the configured stochastic enemy is a chance node and every
/// other enemy minimizes
pub struct Expectimax {
    options: StrategyOptions,
    stochastic_enemy: usize,
}

impl Expectimax {
    /// `stochastic_enemy` is the agent index (so `>= 1`) of the enemy that moves at random
    pub fn new(options: StrategyOptions, stochastic_enemy: usize) -> Self {
        Self {
            options,
            stochastic_enemy,
        }
    }

    /// Agent index of the enemy treated as moving at random
    pub fn stochastic_enemy(&self) -> usize {
        self.stochastic_enemy
    }

    fn expectimax<G: GameModel>(
        &self,
        game: &G,
        ctx: &mut SearchContext<G>,
        mut state: G::State,
        depth: usize,
        agent_index: usize,
        player_action: Option<G::Action>,
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

        let mut explore = |action: G::Action| {
            let child = game.generate_successor(&state, agent_index, action);
            let result = self.expectimax(
                game,
                ctx,
                child,
                next_depth,
                next_agent,
                branch_action(player_action, agent_index, action),
            );
            (action, result)
        };

        let result = if agent_index == self.stochastic_enemy {
            let probabilities = chance_probabilities(&moves);
            let scored = probabilities
                .iter()
                .map(|(action, p)| (*p, explore(*action)))
                .collect_vec();

            let score = expected_value(scored.iter().map(|(p, (_, r))| (*p, r.score())));
            let options = scored
                .into_iter()
                .map(|(_, option)| option)
                .sorted_by(|a, b| a.1.score().cmp(&b.1.score()))
                .collect_vec();

            MinMaxReturn::Node {
                kind: NodeKind::Chance,
                options,
                agent_index,
                score,
            }
        } else {
            let mut options = moves.into_iter().map(explore).collect_vec();
            sort_options(&mut options, maximizing);

            MinMaxReturn::Node {
                kind: if maximizing { NodeKind::Max } else { NodeKind::Min },
                score: options[0].1.score(),
                options,
                agent_index,
            }
        };

        ctx.store(game, &state, agent_index, &result);
        result
    }
}

impl<G: GameModel> AdversarialStrategy<G> for Expectimax {
    fn choose_action(
        &self,
        game: &G,
        state: &G::State,
        depth: usize,
        agent_index: usize,
    ) -> Decision<G::Action> {
        info_span!(
            "expectimax",
            depth,
            agent_index,
            stochastic_enemy = self.stochastic_enemy,
            nodes = tracing::field::Empty,
            chosen_score = tracing::field::Empty,
            chosen_action = tracing::field::Empty,
        )
        .in_scope(|| {
            let mut ctx = SearchContext::new(&self.options);
            let tree = self.expectimax(game, &mut ctx, state.clone(), depth, agent_index, None);
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
        "expectimax"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::{test_game::TreeGame, Minimax};

    #[test]
    fn test_probabilities_sum_to_one() {
        for n in 1..=4 {
            let actions: Vec<usize> = (0..n).collect();
            let total: f64 = chance_probabilities(&actions).iter().map(|(_, p)| p).sum();
            assert!((total - 1.0).abs() < 1e-9);
        }

        assert!(chance_probabilities::<usize>(&[]).is_empty());
    }

    #[test]
    fn test_chance_node_averages() {
        let game = TreeGame {
            agents: 2,
            branching: 2,
            leaves: vec![3.0, 5.0, 2.0, 9.0],
        };

        let decision = Expectimax::new(StrategyOptions::default(), 1).choose_action(
            &game,
            &vec![],
            1,
            0,
        );

        // left averages to 4, right to 5.5
        assert_eq!(decision.value, N64::from(5.5));
        assert_eq!(decision.action, Some(1));

        let minimax = Minimax::default().choose_action(&game, &vec![], 1, 0);
        assert_eq!(minimax.action, Some(0));
    }

    #[test]
    fn test_chance_node_reports_the_worst_outcome() {
        let game = TreeGame {
            agents: 2,
            branching: 2,
            leaves: vec![3.0, 5.0, 9.0, 2.0],
        };

        // Start at the enemy's turn below the right branch, where its moves lead to 9 and 2
        let decision = Expectimax::new(StrategyOptions::default(), 1).choose_action(
            &game,
            &vec![1],
            1,
            1,
        );

        assert_eq!(decision.value, N64::from(5.5));
        assert_eq!(decision.action, Some(1));
    }

    #[test]
    fn test_a_possible_loss_outweighs_a_possible_win() {
        let scores = vec![
            (0.5, N64::INFINITY),
            (0.5, N64::NEG_INFINITY),
        ];
        assert_eq!(expected_value(scores.into_iter()), N64::NEG_INFINITY);

        let scores = vec![(0.5, N64::INFINITY), (0.5, N64::from(2.0))];
        assert_eq!(expected_value(scores.into_iter()), N64::INFINITY);

        let scores = vec![(0.25, N64::from(4.0)), (0.75, N64::from(8.0))];
        assert_eq!(expected_value(scores.into_iter()), N64::from(7.0));
    }
}
