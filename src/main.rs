use docopt::Docopt;
use zcss::{Options, SassError};

use std::fs;
use std::process;

const VERSION: &str = env!("CARGO_PKG_VERSION");
static USAGE: &str = "
Usage:
    zcss [-t <style>] [-d <depth>] <inputfile>
    zcss [-vh]

Options:
    -h, --help                       Show this message
    -v, --version                    Show the version
    -t <style>, --style <style>      Output style: compact, expanded or compressed [default: compact]
    -d <depth>, --max-depth <depth>  Deepest nesting allowed [default: 64]
";

fn run(style: &str, depth: &str, inputfile: &str) -> Result<(), SassError> {
    let max_depth = match depth.parse() {
        Ok(d) => d,
        Err(_) => {
            eprintln!("Invalid depth `{}`; expected a positive number.", depth);
            process::exit(2);
        },
    };
    let options = Options {
        style: style.parse()?,
        max_depth,
    };

    let input = fs::read_to_string(inputfile)?;
    let compiled = zcss::compile_with_options(&input, &options)?;
    for diagnostic in &compiled.diagnostics {
        eprintln!("warning: {}", diagnostic);
    }
    print!("{}", compiled.css);
    Ok(())
}

fn main() {
    env_logger::init();

    let args = Docopt::new(USAGE)
                      .and_then(|d| d.parse())
                      .unwrap_or_else(|e| e.exit());

    if args.get_bool("-v") {
        println!("{}", VERSION);
        return;
    }

    if let Err(e) = run(args.get_str("-t"), args.get_str("-d"), args.get_str("<inputfile>")) {
        eprintln!("Compilation failed: {}", e);
        process::exit(1);
    }
}
