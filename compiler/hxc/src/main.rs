//! Haxe backend CLI.

use hxc::commands::{explain_error, gen_file, parse_gen_options};
use hxc::tracing_setup::init_tracing;

fn main() {
    init_tracing();
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "gen" => {
            if args.len() < 3 {
                print_gen_usage();
                std::process::exit(1);
            }
            let options = match parse_gen_options(&args[3..]) {
                Ok(options) => options,
                Err(message) => {
                    eprintln!("error: {message}");
                    eprintln!();
                    print_gen_usage();
                    std::process::exit(1);
                }
            };
            gen_file(&args[2], &options);
        }
        "explain" | "--explain" => {
            if args.len() < 3 {
                eprintln!("Usage: hxc explain <error-code>");
                eprintln!("Example: hxc explain E1001");
                std::process::exit(1);
            }
            explain_error(&args[2]);
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-V" => {
            println!("hxc {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_gen_usage() {
    eprintln!("Usage: hxc gen <program.json> [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --out=<dir>          Output directory (default: out)");
    eprintln!("  --subtarget=<name>   cpp, windows, linux, mac, android, js, neko, php,");
    eprintln!("                       python, cs, java, hl, lua (default: cpp)");
    eprintln!("  --no-parallel        Generate classes on one thread");
    eprintln!("  --no-source-maps     Skip the .map files");
    eprintln!("  --no-reflection      Skip the reflection registration routines");
    eprintln!("  --goto               Emit label/goto bodies natively (C++ family only)");
}

fn print_usage() {
    println!("hxc - Haxe backend for class-based programs");
    println!();
    println!("Usage: hxc <command> [options]");
    println!();
    println!("Commands:");
    println!("  gen <program.json>   Generate Haxe units from a program model");
    println!("  explain <code>       Explain an error code");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Environment:");
    println!("  HXC_LOG=<filter>     Enable tracing output (falls back to RUST_LOG)");
    println!("  HXC_LOG_TREE=1       Print spans as an indented tree");
}
