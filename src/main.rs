fn main() {
    brandkit::app::cli::run();
}
