use color_eyre::eyre::Result;
use tracing_subscriber::filter::LevelFilter;
use zb_apps::{cli, logging};

fn main() -> Result<()> {
    color_eyre::install()?;
    logging::init_from_env_or(LevelFilter::INFO)?;
    cli::main()
}
