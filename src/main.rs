use std::io;
use std::process;

fn main() {
    pretty_env_logger::init();

    let code = decicalc::cli::run(
        std::env::args().skip(1),
        io::stdin().lock(),
        io::stdout().lock(),
        io::stderr().lock(),
    );
    process::exit(code);
}
