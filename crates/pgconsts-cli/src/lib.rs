mod cli;
mod config;
mod generate;
mod logging;
mod write;

pub fn run(args: Vec<String>) -> anyhow::Result<()> {
    let cmd = cli::parse_args(&args)?;
    match cmd {
        cli::Command::Help => {
            cli::print_help();
            Ok(())
        }
        cli::Command::PrintTemplate => {
            print!("{}", pgconsts::DEFAULT_TEMPLATE);
            Ok(())
        }
        cli::Command::Generate(args) => {
            logging::init(args.verbose);
            generate::run(args)
        }
    }
}
