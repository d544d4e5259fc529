#[tokio::main]
async fn main() {
    if let Err(e) = aarogyalink_lib::run().await {
        eprintln!("aarogyalink: {e}");
        std::process::exit(1);
    }
}
