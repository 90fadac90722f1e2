fn main() -> anyhow::Result<()> {
    sourcemount::cli::run_cli()
}
