use color_eyre::eyre::Result;
use colored::Colorize;
use maze_agents::registry::AgentKind;

#[derive(clap::Args, Debug)]
pub(crate) struct Explain {
    /// Only describe this agent
    #[clap(value_parser)]
    agent: Option<AgentKind>,
}

impl Explain {
    pub(crate) fn run(self) -> Result<()> {
        let kinds = match self.agent {
            Some(kind) => vec![kind],
            None => AgentKind::all().to_vec(),
        };

        for kind in kinds {
            let filled = if kind.filled_compatible() {
                " (filled mazes)".dimmed().to_string()
            } else {
                String::new()
            };
            println!("{}{}", kind.name().bold(), filled);
            println!("    {}", kind.explain());
        }

        Ok(())
    }
}
