use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    sally::main_entry().await
}
