use std::path::PathBuf;

use color_eyre::eyre::{eyre, Result};
use colored::Colorize;
use maze_agents::search::generate_mst;
use types::WalkabilityMatrix;

use super::load_fixture;

#[derive(clap::Args, Debug)]
pub(crate) struct Mst {
    /// Maze fixture (JSON) full of diamonds
    #[clap(value_parser)]
    fixture: PathBuf,
}

impl Mst {
    pub(crate) fn run(self) -> Result<()> {
        let fixture = load_fixture(&self.fixture)?;
        let walkability = WalkabilityMatrix::compute(&fixture.maze);
        let goals = walkability.goal_locations();

        if goals.is_empty() {
            return Err(eyre!("{} has no diamonds", self.fixture.display()));
        }
        if !fixture.is_filled() {
            println!(
                "{}",
                "This maze isn't filled, the order is still printed for its diamonds".yellow()
            );
        }

        let edges = generate_mst(fixture.start, &goals);
        for (i, (from, to)) in edges.iter().enumerate() {
            println!("{:>3}. {} -> {}", i + 1, from, to.to_string().green());
        }

        Ok(())
    }
}
