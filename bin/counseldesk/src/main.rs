use eyre::Report;

#[tokio::main]
async fn main() -> Result<(), Report> {
    counseldesk::run().await
}
