use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "install-tool")]
#[command(about = "Copies a file with administrator privileges")]
#[command(disable_help_flag = true)]
pub struct Args {
    /// File to copy, passed to the copy tool verbatim.
    #[arg(allow_hyphen_values = true)]
    pub source: PathBuf,

    /// Where to copy it, passed to the copy tool verbatim.
    #[arg(allow_hyphen_values = true)]
    pub destination: PathBuf,
}
