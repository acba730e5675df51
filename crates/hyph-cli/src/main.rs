#![forbid(unsafe_code)]

fn main() {
    if let Err(error) = hyph_cli::run_from_env() {
        let code = error.exit_code();
        if code != 0 {
            eprintln!("hyphenator: {error}");
        }
        std::process::exit(code);
    }
}
