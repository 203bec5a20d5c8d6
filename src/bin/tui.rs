use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    hueloom::tui::run().await
}
