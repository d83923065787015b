//! The three adversarial strategies and what they share
//!
//! All three recurse over the game in round-robin turn order and stop at depth `0` or a terminal
//! state. Agent `0` always maximizes.
//!
//! - [Minimax] lets every enemy minimize and explores the whole tree
//! - [AlphaBeta] returns the same value as [Minimax] but cuts off branches that can't change it
//! - [Expectimax] treats one configured enemy as moving uniformly at random
//!
//! A search runs synchronously on the calling thread and is not interruptible. A caller that
//! wants to stop has to wait for the current call to return, so the depth bounds how long that
//! takes.

use std::{fmt::Debug, str::FromStr};

use decorum::N64;
use rustc_hash::FxHashMap;

use crate::GameModel;

mod minimax_return;
pub use minimax_return::{MinMaxReturn, NodeKind};

mod minimax;
pub use self::minimax::Minimax;

mod alpha_beta;
pub use alpha_beta::AlphaBeta;

mod expectimax;
pub use expectimax::{chance_probabilities, Expectimax};

/// Picks a move for an agent by searching the game tree
pub trait AdversarialStrategy<G: GameModel> {
    /// Search `depth` full rounds ahead of `state` with `agent_index` to move
    fn choose_action(
        &self,
        game: &G,
        state: &G::State,
        depth: usize,
        agent_index: usize,
    ) -> Decision<G::Action>;

    /// Name used in logs
    fn name(&self) -> &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Optional properties that can be defined for any of the strategies
///
/// The defaults (as implemented by [Default]) are as follows:
/// ```
/// use maze_minimax::StrategyOptions;
///
/// let defaults = StrategyOptions::default();
///
/// assert!(!defaults.transposition_table);
/// ```
pub struct StrategyOptions {
    /// Remember the result of every searched node by position and reuse it when the same
    /// positions come up again with the same agent to move
    ///
    /// The key has no depth in it, so a cached value can come from a shallower or deeper search
    /// of the same positions, and under [AlphaBeta] from a node that was cut off. This trades
    /// exactness for speed on maps where agents can walk in circles, and can change the chosen
    /// action.
    ///
    /// Defaults to false
    pub transposition_table: bool,
}

impl Default for StrategyOptions {
    fn default() -> Self {
        Self {
            transposition_table: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Which adversarial strategy to run
pub enum StrategyKind {
    #[allow(missing_docs)]
    Minimax,
    #[allow(missing_docs)]
    AlphaBeta,
    #[allow(missing_docs)]
    Expectimax,
}

impl StrategyKind {
    #[allow(missing_docs)]
    pub fn name(&self) -> &'static str {
        match self {
            StrategyKind::Minimax => "minimax",
            StrategyKind::AlphaBeta => "alphabeta",
            StrategyKind::Expectimax => "expectimax",
        }
    }
}

impl FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "minimax" => Ok(StrategyKind::Minimax),
            "alphabeta" => Ok(StrategyKind::AlphaBeta),
            "expectimax" => Ok(StrategyKind::Expectimax),
            other => Err(format!("unknown strategy {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Counters collected during one search
pub struct SearchStats {
    /// Every node entered, leaves included
    pub nodes: usize,
    /// Nodes answered by the transposition table
    pub table_hits: usize,
}

#[derive(Debug, Clone)]
/// The result of [AdversarialStrategy::choose_action]
pub struct Decision<Action> {
    /// Value of the root
    pub value: N64,
    /// The move to make, `None` if the moving agent had none
    pub action: Option<Action>,
    /// Everything that was explored
    pub tree: MinMaxReturn<Action>,
    #[allow(missing_docs)]
    pub stats: SearchStats,
}

impl<Action> Decision<Action>
where
    Action: Copy + Debug + std::fmt::Display,
{
    pub(crate) fn new(tree: MinMaxReturn<Action>, stats: SearchStats) -> Self {
        Self {
            value: tree.score(),
            action: tree.best_action(),
            tree,
            stats,
        }
    }
}

/// Per-search bookkeeping: the node counter and the optional transposition table
pub(crate) struct SearchContext<G: GameModel> {
    pub(crate) stats: SearchStats,
    table: Option<FxHashMap<G::Key, (N64, Option<G::Action>)>>,
}

impl<G: GameModel> SearchContext<G> {
    pub(crate) fn new(options: &StrategyOptions) -> Self {
        Self {
            stats: SearchStats::default(),
            table: options.transposition_table.then(FxHashMap::default),
        }
    }

    pub(crate) fn enter(&mut self) {
        self.stats.nodes += 1;
    }

    pub(crate) fn lookup(
        &mut self,
        game: &G,
        state: &G::State,
        agent_index: usize,
    ) -> Option<MinMaxReturn<G::Action>> {
        let table = self.table.as_ref()?;
        let (score, action) = *table.get(&game.transposition_key(state, agent_index))?;
        self.stats.table_hits += 1;

        Some(MinMaxReturn::Transposed { score, action })
    }

    pub(crate) fn store(
        &mut self,
        game: &G,
        state: &G::State,
        agent_index: usize,
        result: &MinMaxReturn<G::Action>,
    ) {
        if let Some(table) = self.table.as_mut() {
            table.insert(
                game.transposition_key(state, agent_index),
                (result.score(), result.best_action()),
            );
        }
    }
}

/// Score `state` as a leaf if the search should stop here
///
/// The terminal check runs first so that won and lost states are flagged even at depth `0`.
pub(crate) fn leaf<G: GameModel>(
    game: &G,
    state: &mut G::State,
    depth: usize,
    player_action: Option<G::Action>,
) -> Option<MinMaxReturn<G::Action>> {
    let terminal = game.is_terminal(state);

    if terminal || depth == 0 {
        Some(MinMaxReturn::Leaf {
            score: game.evaluate(state, depth, player_action),
        })
    } else {
        None
    }
}

/// The move agent `0` made at the top of the branch, once it has made one
pub(crate) fn branch_action<A: Copy>(
    player_action: Option<A>,
    agent_index: usize,
    action: A,
) -> Option<A> {
    player_action.or_else(|| (agent_index == 0).then_some(action))
}

/// Sort options best first for the moving agent, keeping move order among equal scores
pub(crate) fn sort_options<A: Copy + Debug + std::fmt::Display>(
    options: &mut [(A, MinMaxReturn<A>)],
    maximizing: bool,
) {
    if maximizing {
        options.sort_by(|a, b| b.1.score().cmp(&a.1.score()));
    } else {
        options.sort_by(|a, b| a.1.score().cmp(&b.1.score()));
    }
}
