fn main() {
    lpc::app::cli::run();
}
