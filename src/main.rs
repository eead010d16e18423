use clap::Parser;
use tracing_subscriber::EnvFilter;

mod args;
use self::args::Args;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = args.config()?;
    durak::cli_main(config, args.save.as_deref())
}
