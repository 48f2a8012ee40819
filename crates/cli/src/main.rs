fn main() {
    if let Err(e) = autumn_cli::run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
