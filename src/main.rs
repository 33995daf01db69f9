#[tokio::main]
async fn main() {
    wanderstay_backend::run().await;
}
