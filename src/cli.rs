use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "lsl", version, about = "List directory contents")]
pub struct Cli {
    /// Do not ignore entries starting with .
    #[arg(short = 'a', long = "all")]
    pub all: bool,

    /// Use the long listing format
    #[arg(short = 'l', long = "long")]
    pub long: bool,

    /// Files or directories to list (defaults to the current directory)
    pub paths: Vec<String>,
}
