use clap::Parser;
use presskit_app::{cli::Cli, dispatch, init_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    dispatch(Cli::parse()).await
}
