use std::{path::PathBuf, time::Duration};

use color_eyre::eyre::{eyre, Result, WrapErr};
use colored::Colorize;
use maze_agents::{
    planner::{AdversarialOptions, SearchOptions},
    registry::{AgentConfig, AgentKind, EnemyKind},
    sim::{Match, MatchOptions, MatchOutcome},
    WorkerOptions,
};
use types::WalkabilityMatrix;

use super::{cost_model, load_fixture};
use crate::render::{draw, format_path, Overlay};

#[derive(clap::Args, Debug)]
pub(crate) struct Run {
    /// Maze fixture (JSON) to play
    #[clap(value_parser)]
    fixture: PathBuf,

    /// Agent for the main character, see the explain command for the list
    #[clap(short, long, value_parser, default_value = "astar")]
    agent: AgentKind,

    /// Use the weighted Manhattan heuristic. Only valid for A*
    #[clap(short, long, action, default_value = "false")]
    weighted: bool,

    /// Slow ground costs 3 instead of 20
    #[clap(long, action, default_value = "false")]
    simple_cost: bool,

    /// How many of the fixture's enemies take part. Defaults to all of them
    #[clap(short, long, value_parser)]
    enemies: Option<usize>,

    /// How the enemies move: random, chaser or adversarial
    #[clap(long, value_parser, default_value = "chaser")]
    enemy_kind: EnemyKind,

    /// Full rounds adversarial agents search ahead
    #[clap(short, long, value_parser, default_value = "2")]
    depth: usize,

    /// The enemy expectimax treats as moving at random
    #[clap(long, value_parser, default_value = "1")]
    stochastic_enemy: usize,

    /// Step away from enemies on the same row at most this many cells away
    #[clap(long, value_parser)]
    lookout: Option<usize>,

    /// Diamonds to collect in a maze that isn't filled
    #[clap(long, value_parser, default_value = "5")]
    diamonds: usize,

    /// Milliseconds between two ticks
    #[clap(long, value_parser, default_value = "20")]
    tick_ms: u64,

    /// Give up after this many ticks
    #[clap(long, value_parser, default_value = "3000")]
    max_ticks: usize,

    /// Seed for random walkers and relocated diamonds
    #[clap(long, value_parser, default_value = "0")]
    seed: u64,

    /// Print the maze with the main agent's trail drawn in
    #[clap(long, action, default_value = "false")]
    draw: bool,
}

impl Run {
    pub(crate) fn run(self) -> Result<()> {
        let mut fixture = load_fixture(&self.fixture)?;

        let enemy_count = self.enemies.unwrap_or(fixture.enemies.len());
        if enemy_count > fixture.enemies.len() {
            return Err(eyre!(
                "{} only has {} enemy starts",
                self.fixture.display(),
                fixture.enemies.len()
            ));
        }
        fixture.enemies.truncate(enemy_count);

        let config = AgentConfig {
            kind: self.agent,
            weighted: self.weighted,
            filled: fixture.is_filled(),
            enemy_count,
            enemy_kind: self.enemy_kind,
            search: SearchOptions {
                cost_model: cost_model(self.simple_cost),
                ..Default::default()
            },
            adversarial: AdversarialOptions {
                depth: self.depth,
                stochastic_enemy: self.stochastic_enemy,
                ..Default::default()
            },
            seed: Some(self.seed),
        }
        .validate()
        .map_err(|e| eyre!("{:#}", e))?;

        let worker = WorkerOptions {
            enemy_lookout: self.lookout,
            ..Default::default()
        };
        let options = MatchOptions {
            tick: Duration::from_millis(self.tick_ms),
            max_ticks: self.max_ticks,
            diamonds_to_win: self.diamonds,
            seed: self.seed,
        };

        tracing::info!(agent = %config.kind, enemies = enemy_count, "starting match");

        let game = Match::start(
            &fixture,
            config.build_planner(),
            config.build_enemies(),
            worker,
            options,
        )
        .map_err(|e| eyre!("{:#}", e))
        .wrap_err("Couldn't start the match")?;
        let report = game.run().map_err(|e| eyre!("{:#}", e))?;

        let outcome = match report.outcome {
            MatchOutcome::Won => "won".green().bold(),
            MatchOutcome::Lost => "lost".red().bold(),
            MatchOutcome::TimedOut => "timed out".yellow().bold(),
        };
        println!("{} {}", "Outcome:".bold(), outcome);
        println!("{} {}", "Ticks:".bold(), report.ticks);
        println!("{} {}", "Diamonds:".bold(), report.collected);
        println!("{} {}", "Trail:".bold(), format_path(&report.trail));

        if self.draw {
            let walkability = WalkabilityMatrix::compute(&fixture.maze);
            let overlay = Overlay {
                start: Some(fixture.start),
                enemies: &fixture.enemies,
                path: &report.trail,
                ..Default::default()
            };
            println!("\n{}", draw(&walkability, &overlay));
        }

        Ok(())
    }
}
