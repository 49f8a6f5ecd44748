#[tokio::main]
async fn main() {
    if let Err(e) = store_uptime_monitor::cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
