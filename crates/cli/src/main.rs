use clap::Parser;
use pagecopy_cli::{cli::Cli, commands, logging, output::print_failure};
use tracing::error;

#[tokio::main]
async fn main() {
	let cli = Cli::parse();
	logging::init_logging(cli.verbose);

	let command = cli.command.name();
	let format = cli.format;

	if let Err(err) = commands::dispatch(cli).await {
		error!(target = "pagecopy", error = %err, command, "command failed");
		if format.is_structured() {
			print_failure(command, err.code(), &err.to_string(), format);
		}
		std::process::exit(1);
	}
}
