#[tokio::main]
async fn main() -> std::io::Result<()> {
    hotel_booking::run().await
}
