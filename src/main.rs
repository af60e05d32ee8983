fn main() -> anyhow::Result<()> {
    product_service::cli::run_cli()
}
