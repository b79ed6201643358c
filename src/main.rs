fn main() {
    if let Err(err) = erp_ingest::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
