use std::io;

fn main() {
    handsim_cli::logging::init_logging();
    let code = handsim_cli::run(std::env::args(), &mut io::stdout(), &mut io::stderr());
    std::process::exit(code);
}
