fn main() {
    stormjob::app::cli::run();
}
