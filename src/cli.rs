use clap::Parser;

/// Command-line overrides applied on top of the environment configuration
#[derive(Debug, Parser)]
#[command(name = "sparplan-api")]
#[command(about = "ETF savings plan backend")]
#[command(version)]
pub struct Cli {
    #[arg(long, help = "Listen port (overrides PORT)")]
    pub port: Option<u16>,

    #[arg(long, help = "Use process-local stores instead of PostgreSQL; data is lost on exit")]
    pub in_memory: bool,

    #[arg(long, help = "Do not apply pending database migrations at startup")]
    pub skip_migrations: bool,
}
