use std::{path::PathBuf, sync::Arc};

use color_eyre::eyre::{eyre, Result};
use colored::Colorize;
use itertools::Itertools;
use maze_agents::planner::{AdversarialOptions, AdversarialPlanner};
use maze_minimax::{GameState, MazeGame, StrategyKind};
use types::WalkabilityMatrix;

use super::load_fixture;

#[derive(clap::Args, Debug)]
pub(crate) struct Adversarial {
    /// Maze fixture (JSON) with at least one enemy
    #[clap(value_parser)]
    fixture: PathBuf,

    /// minimax, alphabeta or expectimax
    #[clap(short, long, value_parser, default_value = "alphabeta")]
    strategy: StrategyKind,

    /// Full rounds to search ahead
    #[clap(short, long, value_parser, default_value = "2")]
    depth: usize,

    /// Agent to choose a move for. 0 is the main agent, enemies follow in fixture order
    #[clap(short, long, value_parser, default_value = "0")]
    agent: usize,

    /// The enemy expectimax treats as moving at random
    #[clap(long, value_parser, default_value = "1")]
    stochastic_enemy: usize,

    /// Reuse results for positions that were already searched
    #[clap(long, action, default_value = "false")]
    transposition_table: bool,

    /// Print the whole search tree
    #[clap(long, action, default_value = "false")]
    tree: bool,
}

impl Adversarial {
    pub(crate) fn run(self) -> Result<()> {
        let fixture = load_fixture(&self.fixture)?;
        if fixture.enemies.is_empty() {
            return Err(eyre!("{} has no enemies to search against", self.fixture.display()));
        }
        if self.agent > fixture.enemies.len() {
            return Err(eyre!(
                "Agent {} doesn't exist, the maze has {} enemies",
                self.agent,
                fixture.enemies.len()
            ));
        }
        if self.strategy == StrategyKind::Expectimax
            && !(1..=fixture.enemies.len()).contains(&self.stochastic_enemy)
        {
            return Err(eyre!(
                "The random enemy must be between 1 and {}",
                fixture.enemies.len()
            ));
        }

        let walkability = Arc::new(WalkabilityMatrix::compute(&fixture.maze));
        let state = GameState::new(
            fixture.start,
            fixture.enemies.iter().copied(),
            walkability.goal_locations(),
        );

        let options = AdversarialOptions {
            depth: self.depth,
            transposition_table: self.transposition_table,
            stochastic_enemy: self.stochastic_enemy,
            ..Default::default()
        };
        let planner = AdversarialPlanner::new(self.strategy, options, self.agent);
        let game = MazeGame::new(walkability, options.weights, &state);

        let decision = planner.decide(&game, &state);

        let action = decision
            .action
            .map_or("none".red().to_string(), |a| a.to_string().green().to_string());
        println!("{} {}", "Strategy:".bold(), self.strategy.name());
        println!("{} {}", "Move:".bold(), action);
        println!("{} {}", "Value:".bold(), decision.value);
        println!(
            "{} {} ({} from the table)",
            "Nodes:".bold(),
            decision.stats.nodes,
            decision.stats.table_hits
        );
        println!(
            "{} {}",
            "Route:".bold(),
            decision
                .tree
                .chosen_route()
                .iter()
                .map(|(agent, m)| format!("{}:{}", agent, m))
                .join(" ")
        );

        if self.tree {
            if let Some(tree) = decision.tree.to_text_tree() {
                println!("\n{}", tree);
            }
        }

        Ok(())
    }
}
