use std::process;

fn main() {
    process::exit(pdpmon_cli::run());
}
