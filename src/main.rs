//! `mint` - Local file-backed issue tracker
//!
//! Single YAML document per project, no daemon, no background processes.

use mint::run;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
