use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    cloudmcp::main_entry().await
}
