fn main() {
    if let Err(err) = retail_synth::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
