use clap::Subcommand;

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    #[command(
        about = "Create or verify the SQLite schema and exit",
        long_about = "Open the configured SQLite database, create the capybaras table when missing, and exit. Honors --reset."
    )]
    Migrate,
}
