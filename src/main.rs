fn main() {
    scm_setup::app::cli::run();
}
