use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = herald::cli::Cli::parse();
    herald::run(cli)
}
