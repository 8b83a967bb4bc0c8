use crate::cli::Command;
use crate::context;

pub mod migrate;

impl Command {
    pub fn run(&self, ctx: &context::Context) -> anyhow::Result<()> {
        match self {
            Command::Migrate => migrate::run(ctx),
        }
    }
}
