use std::io::{self, Write};

fn main() {
    parlor_cli::logging::init_logging();
    let mut out = io::stdout();
    let mut err = io::stderr();
    let code = parlor_cli::run(std::env::args(), &mut out, &mut err);
    let _ = out.flush();
    std::process::exit(code);
}
