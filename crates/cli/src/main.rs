fn main() {
    routegen_cli::init_tracing();
    let code = routegen_cli::run_cli(std::env::args().collect());
    std::process::exit(code);
}
