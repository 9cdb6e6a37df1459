#[tokio::main]
async fn main() {
    if let Err(err) = ws_api::run().await {
        tracing::error!(error = %err, "ws-api failed");
        eprintln!("ws-api failed: {err}");
        std::process::exit(1);
    }
}
