use tracing::info_span;

use super::{
    branch_action, leaf, sort_options, AdversarialStrategy, Decision, MinMaxReturn, NodeKind,
    SearchContext, StrategyOptions,
};
use crate::{next_turn, GameModel};

#[derive(Debug, Clone, Copy, Default)]
/// Plain minimax: agent `0` maximizes, every other agent minimizes, nothing is pruned
pub struct Minimax {
    options: StrategyOptions,
}

impl Minimax {
    #[allow(missing_docs)]
    pub fn new(options: StrategyOptions) -> Self {
        Self { options }
    }

    fn minimax<G: GameModel>(
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

        let mut options: Vec<_> = moves
            .into_iter()
            .map(|action| {
                let child = game.generate_successor(&state, agent_index, action);
                let result = self.minimax(
                    game,
                    ctx,
                    child,
                    next_depth,
                    next_agent,
                    branch_action(player_action, agent_index, action),
                );

                (action, result)
            })
            .collect();

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

impl<G: GameModel> AdversarialStrategy<G> for Minimax {
    fn choose_action(
        &self,
        game: &G,
        state: &G::State,
        depth: usize,
        agent_index: usize,
    ) -> Decision<G::Action> {
        info_span!(
            "minimax",
            depth,
            agent_index,
            nodes = tracing::field::Empty,
            chosen_score = tracing::field::Empty,
            chosen_action = tracing::field::Empty,
        )
        .in_scope(|| {
            let mut ctx = SearchContext::new(&self.options);
            let tree = self.minimax(game, &mut ctx, state.clone(), depth, agent_index, None);
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
        "minimax"
    }
}
