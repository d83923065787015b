use std::{
    fmt::{Debug, Display},
    hash::Hash,
};

use decorum::N64;

/// A turn based game the adversarial strategies can search
///
/// Agents take turns in index order `0, 1, ..., n - 1, 0, ...`. Agent `0` is the maximizing agent
/// and every score is from its point of view.
pub trait GameModel {
    /// A full snapshot of the game
    type State: Clone + Debug;
    /// One move of one agent
    type Action: Copy + Eq + Debug + Display;
    /// What the transposition table is keyed on
    type Key: Hash + Eq + Debug;

    /// How many agents take turns in this state
    fn agent_count(&self, state: &Self::State) -> usize;

    /// The moves `agent_index` may take
    fn legal_moves(&self, state: &Self::State, agent_index: usize) -> Vec<Self::Action>;

    /// A copy of `state` where only `agent_index` has taken `action`
    ///
    /// `state` itself is never modified.
    fn generate_successor(
        &self,
        state: &Self::State,
        agent_index: usize,
        action: Self::Action,
    ) -> Self::State;

    /// Whether the game is over, recording the outcome in the state
    fn is_terminal(&self, state: &mut Self::State) -> bool;

    /// Score a state for agent `0`
    ///
    /// `depth` is the number of rounds left in the search and `player_action` is the move agent
    /// `0` made at the top of this branch, if it had one.
    fn evaluate(
        &self,
        state: &Self::State,
        depth: usize,
        player_action: Option<Self::Action>,
    ) -> N64;

    /// Transposition table key for `state` with `agent_index` to move
    fn transposition_key(&self, state: &Self::State, agent_index: usize) -> Self::Key;
}

/// Who moves after `agent_index`, and with how many rounds left
///
/// The depth only goes down once every agent has moved, when control gets back to agent `0`.
///
/// ```rust
/// use maze_minimax::next_turn;
///
/// assert_eq!(next_turn(0, 3, 2), (1, 2));
/// assert_eq!(next_turn(2, 3, 2), (0, 1));
/// ```
pub fn next_turn(agent_index: usize, agent_count: usize, depth: usize) -> (usize, usize) {
    let next = (agent_index + 1) % agent_count.max(1);
    if next == 0 {
        (next, depth.saturating_sub(1))
    } else {
        (next, depth)
    }
}
