use std::{
    env,
    io::{self, BufWriter},
    process,
};

use bench_report::{cli::CleanupConfig, clean_log, logging::init_tracing};

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.iter().any(|arg| arg == "--help" || arg == "-h") {
        print!("{}", CleanupConfig::help());
        return;
    }
    let arg_refs: Vec<&str> = args.iter().map(|s| s.as_str()).collect();
    let config = match CleanupConfig::from_args(&arg_refs) {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("error: {err}");
            eprint!("{}", CleanupConfig::help());
            process::exit(2);
        }
    };
    init_tracing();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    if let Err(err) = clean_log(stdin.lock(), &mut out, &config.marker) {
        eprintln!("cleanup_bench: {err}");
        process::exit(1);
    }
}
