fn main() {
    jobsafe::cli::run();
}
