fn main() {
    if let Err(err) = approval_cli::run() {
        approval_cli::report_error(&err);
        std::process::exit(1);
    }
}
