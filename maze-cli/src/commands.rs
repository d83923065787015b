pub mod adversarial;
pub mod compare;
pub mod explain;
pub mod mst;
pub mod run;
pub mod solve;

use std::{fs::read_to_string, path::Path};

use adversarial::Adversarial;
use compare::Compare;
use explain::Explain;
use mst::Mst;
use run::Run;
use solve::Solve;

use clap::Subcommand;
use color_eyre::eyre::{eyre, Result, WrapErr};
use maze_agents::search::CostModel;
use types::MazeFixture;

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Plan one path through a maze fixture
    Solve(Solve),
    /// Print the order a filled maze would be emptied in
    Mst(Mst),
    /// Print the decision tree of one adversarial search
    Adversarial(Adversarial),
    /// Play a headless match
    Run(Run),
    /// Run every path search on the same maze
    Compare(Compare),
    /// Describe the available agents
    Explain(Explain),
}

impl Command {
    pub fn run(self) -> Result<()> {
        match self {
            Command::Solve(s) => s.run()?,
            Command::Mst(m) => m.run()?,
            Command::Adversarial(a) => a.run()?,
            Command::Run(r) => r.run()?,
            Command::Compare(c) => c.run()?,
            Command::Explain(e) => e.run()?,
        }

        Ok(())
    }
}

pub(crate) fn load_fixture(path: &Path) -> Result<MazeFixture> {
    let json = read_to_string(path)
        .wrap_err_with(|| format!("Couldn't read maze fixture {}", path.display()))?;

    MazeFixture::from_json(&json).map_err(|e| eyre!("{:#}", e))
}

pub(crate) fn cost_model(simple_cost: bool) -> CostModel {
    if simple_cost {
        CostModel::Simple
    } else {
        CostModel::CostSensitive
    }
}
