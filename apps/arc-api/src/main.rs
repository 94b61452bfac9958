use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = arc_api::Args::parse();

	arc_api::run(args).await
}
