//! charsprite - Command-line tool for converting images to character sprites

use std::process::ExitCode;

use charsprite::cli;

fn main() -> ExitCode {
    cli::run()
}
