use clap::Parser as _;
use notify_mcp_adapter::config::Args;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    notify_mcp_adapter::run(args).await?;
    Ok(())
}
