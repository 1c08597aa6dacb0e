//! `corkboard` command-line entry point.

fn main() {
    let stdout = std::io::stdout();
    if let Err(error) = corkboard_cli::run(std::env::args_os(), &mut stdout.lock()) {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}
