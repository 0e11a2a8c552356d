#[tokio::main]
async fn main() {
    booking_core::run().await;
}
