use std::{path::PathBuf, sync::Arc};

use color_eyre::eyre::{eyre, Result};
use colored::Colorize;
use maze_agents::{
    planner::SearchOptions,
    registry::{AgentConfig, AgentKind},
    search::path_cost,
    Planner, PlannerView,
};
use maze_minimax::GameState;
use types::{MazeSize, WalkabilityMatrix};

use super::{cost_model, load_fixture};
use crate::render::{draw, format_path, Overlay};

#[derive(clap::Args, Debug)]
pub(crate) struct Solve {
    /// Maze fixture (JSON) to plan through
    #[clap(value_parser)]
    fixture: PathBuf,

    /// Agent to plan with, see the explain command for the list
    #[clap(short, long, value_parser, default_value = "astar")]
    agent: AgentKind,

    /// Use the weighted Manhattan heuristic. Only valid for A*
    #[clap(short, long, action, default_value = "false")]
    weighted: bool,

    /// Slow ground costs 3 instead of 20
    #[clap(long, action, default_value = "false")]
    simple_cost: bool,

    /// Seed for the random agent
    #[clap(long, value_parser)]
    seed: Option<u64>,

    /// Print the maze with the path drawn in
    #[clap(short, long, action, default_value = "false")]
    draw: bool,
}

impl Solve {
    pub(crate) fn run(self) -> Result<()> {
        let fixture = load_fixture(&self.fixture)?;
        let walkability = Arc::new(WalkabilityMatrix::compute(&fixture.maze));
        let goals = walkability.goal_locations();

        let config = AgentConfig {
            kind: self.agent,
            weighted: self.weighted,
            filled: fixture.is_filled(),
            enemy_count: fixture.enemies.len(),
            search: SearchOptions {
                cost_model: cost_model(self.simple_cost),
                ..Default::default()
            },
            seed: self.seed,
            ..Default::default()
        }
        .validate()
        .map_err(|e| eyre!("{:#}", e))?;

        let state = GameState::new(fixture.start, fixture.enemies.iter().copied(), goals.clone());
        let view = PlannerView {
            walkability: &walkability,
            goals: &goals,
            state: Some(&state),
        };

        let mut planner = config.build_planner();
        let outcome = planner
            .plan(fixture.start, &view)
            .ok_or_else(|| eyre!("{} found no path from {}", planner.name(), fixture.start))?;

        println!(
            "{} {}x{} ({:?})",
            "Maze:".bold(),
            fixture.maze.rows(),
            fixture.maze.cols(),
            MazeSize::of(&fixture.maze)
        );
        println!("{} {}", "Agent:".bold(), planner.name());
        println!("{} {}", "Path:".bold(), format_path(&outcome.path).green());
        println!(
            "{} {} cells, cost {}",
            "Length:".bold(),
            outcome.path.len(),
            path_cost(&walkability, &outcome.path, config.search.cost_model)
        );
        println!("{} {} cells", "Visited:".bold(), outcome.visited.len());

        if self.draw {
            let overlay = Overlay {
                start: Some(fixture.start),
                enemies: &fixture.enemies,
                path: &outcome.path,
                visited: &outcome.visited,
            };
            println!("\n{}", draw(&walkability, &overlay));
        }

        Ok(())
    }
}
