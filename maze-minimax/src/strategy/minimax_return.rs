use std::fmt::{Debug, Display};

use decorum::N64;
use text_trees::StringTreeNode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// How a [MinMaxReturn::Node] combined the scores of its options
pub enum NodeKind {
    /// The main agent picked the highest score
    Max,
    /// An enemy picked the lowest score
    Min,
    /// An enemy moved at random, the score is the average over its options
    Chance,
}

#[derive(Debug, Clone)]
/// The explored game tree, as built by one of the adversarial strategies
pub enum MinMaxReturn<Action> {
    /// An agent had moves to choose from; every searched move is kept with its subtree
    Node {
        /// Whether the options were maximized, minimized or averaged
        kind: NodeKind,
        /// Each searched move with its subtree, best first for the moving agent. Chance nodes
        /// sort lowest first. The head of the list is the move reported for this node
        options: Vec<(Action, Self)>,
        /// Which agent was moving at this node
        agent_index: usize,
        /// Equal to the head of `options` for max and min nodes, the average for chance nodes
        score: N64,
    },
    /// Search stopped here: the game was won or lost, the depth ran out, or an enemy was stuck
    Leaf {
        #[allow(missing_docs)]
        score: N64,
    },
    /// A node whose result came out of the transposition table instead of being searched
    Transposed {
        #[allow(missing_docs)]
        score: N64,
        /// The action stored alongside the score
        action: Option<Action>,
    },
}

impl<Action> MinMaxReturn<Action>
where
    Action: Copy + Debug + Display,
{
    #[allow(missing_docs)]
    pub fn score(&self) -> N64 {
        match self {
            MinMaxReturn::Node { score, .. } => *score,
            MinMaxReturn::Leaf { score } => *score,
            MinMaxReturn::Transposed { score, .. } => *score,
        }
    }

    /// The action chosen at this node, if one was
    ///
    /// Options are kept sorted, so this is the head of the list
    pub fn best_action(&self) -> Option<Action> {
        match self {
            MinMaxReturn::Node { options, .. } => options.first().map(|(a, _)| *a),
            MinMaxReturn::Leaf { .. } => None,
            MinMaxReturn::Transposed { action, .. } => *action,
        }
    }

    /// The line of play the search expects, as `(agent, action)` pairs from the root down
    pub fn chosen_route(&self) -> Vec<(usize, Action)> {
        let mut route = vec![];
        let mut node = self;

        while let MinMaxReturn::Node {
            agent_index,
            options,
            ..
        } = node
        {
            match options.first() {
                Some((action, child)) => {
                    route.push((*agent_index, *action));
                    node = child;
                }
                None => break,
            }
        }

        route
    }

    /// Render the tree with the score, node kind and moving agent on every line
    pub fn to_text_tree(&self) -> Option<String> {
        self.text_node("root".to_owned()).map(|n| n.to_string())
    }

    fn text_node(&self, label: String) -> Option<StringTreeNode> {
        match self {
            MinMaxReturn::Leaf { score } => Some(StringTreeNode::new(format!("{} {}", label, score))),
            MinMaxReturn::Transposed { score, .. } => {
                Some(StringTreeNode::new(format!("{} {} (cached)", label, score)))
            }
            MinMaxReturn::Node {
                kind,
                options,
                agent_index,
                score,
            } => {
                let mut node = StringTreeNode::new(format!("{} {:?} {}", label, kind, score));
                for (action, result) in options {
                    if let Some(child) =
                        result.text_node(format!("{} agent {}", action, agent_index))
                    {
                        node.push_node(child);
                    }
                }

                Some(node)
            }
        }
    }
}
