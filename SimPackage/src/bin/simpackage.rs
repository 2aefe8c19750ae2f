fn main() -> anyhow::Result<()> {
    simpackage::cli::run_cli()
}
