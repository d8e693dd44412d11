fn main() {
    if let Err(err) = ripple_lib::run() {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}
