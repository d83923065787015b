use std::path::PathBuf;

use color_eyre::eyre::Result;
use colored::Colorize;
use maze_agents::compare::compare_searches;
use types::WalkabilityMatrix;

use super::{cost_model, load_fixture};

#[derive(clap::Args, Debug)]
pub(crate) struct Compare {
    /// Maze fixture (JSON) to search
    #[clap(value_parser)]
    fixture: PathBuf,

    /// Slow ground costs 3 instead of 20
    #[clap(long, action, default_value = "false")]
    simple_cost: bool,

    /// Print the reports as JSON instead of a table
    #[clap(long, action, default_value = "false")]
    json: bool,
}

impl Compare {
    pub(crate) fn run(self) -> Result<()> {
        let fixture = load_fixture(&self.fixture)?;
        let walkability = WalkabilityMatrix::compute(&fixture.maze);
        let goals = walkability.goal_locations();

        let reports = compare_searches(
            &walkability,
            fixture.start,
            &goals,
            cost_model(self.simple_cost),
        );

        if self.json {
            println!("{}", serde_json::to_string_pretty(&reports)?);
            return Ok(());
        }

        let best_cost = reports.iter().filter_map(|r| r.cost).min();

        println!(
            "{}",
            format!(
                "{:<22} {:>6} {:>6} {:>8} {:>10}",
                "search", "length", "cost", "visited", "time"
            )
            .bold()
        );
        for r in &reports {
            let length = r.path_len.map_or("-".to_string(), |l| l.to_string());
            let cost = match r.cost {
                Some(c) if Some(c) == best_cost => format!("{:>6}", c).green(),
                Some(c) => format!("{:>6}", c).normal(),
                None => format!("{:>6}", "-").red(),
            };
            println!(
                "{:<22} {:>6} {} {:>8} {:>10}",
                r.contender.name(),
                length,
                cost,
                r.visited,
                format!("{:?}", r.elapsed)
            );
        }

        Ok(())
    }
}
