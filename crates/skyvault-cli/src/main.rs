//! SkyVault CLI entrypoint.

#[tokio::main]
async fn main() {
    let exit_code = skyvault_cli::run().await;
    std::process::exit(exit_code);
}
