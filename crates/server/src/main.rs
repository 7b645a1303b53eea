#[tokio::main]
async fn main() -> anyhow::Result<()> {
    frameforge_server::start().await
}
