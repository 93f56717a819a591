use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "dr", about = concat!("darkroom v", env!("CARGO_PKG_VERSION"), " - photo gallery admin from the terminal"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Read configuration from this file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Gallery origin, overriding server.url from the config
    #[arg(long, global = true)]
    pub server: Option<String>,

    /// Scratch store file (holds the last submitted position)
    #[arg(long, global = true, hide = true)]
    pub store: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the detail view of an image in the TUI
    Open(ImageArg),
    /// Print what the detail page of an image carries
    Show(ImageArg),
    /// Look up autocomplete suggestions
    Suggest(SuggestArgs),
    /// Rotate an image
    Rotate(RotateArgs),
    /// Attach tags, people or places to an image
    Tag(TagArgs),
    /// Set an image's grade
    Grade(GradeArgs),
    /// Set an image's position
    Locate(LocateArgs),
    /// Print the last submitted position
    Lastpos,
    /// Edit the config file
    Config(ConfigCmd),
}

#[derive(Args)]
pub struct ImageArg {
    /// Image id
    pub id: u32,
}

#[derive(Args)]
pub struct SuggestArgs {
    /// Restrict to one category (tag, person, place); omit for global search
    #[arg(long)]
    pub category: Option<String>,
    /// Text to complete
    pub query: String,
}

#[derive(Args)]
pub struct RotateArgs {
    pub id: u32,
    /// left, right, -90 or 90
    #[arg(allow_hyphen_values = true)]
    pub direction: String,
}

#[derive(Args)]
pub struct TagArgs {
    pub id: u32,
    /// tag, person or place
    pub category: String,
    /// Names to attach, one request each
    #[arg(required = true)]
    pub names: Vec<String>,
}

#[derive(Args)]
pub struct GradeArgs {
    pub id: u32,
    /// 0-100
    #[arg(value_parser = clap::value_parser!(u8).range(0..=100))]
    pub grade: u8,
}

#[derive(Args)]
pub struct LocateArgs {
    pub id: u32,
    #[arg(allow_hyphen_values = true)]
    pub lat: f64,
    #[arg(allow_hyphen_values = true)]
    pub lng: f64,
}

#[derive(Args)]
pub struct ConfigCmd {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Set the gallery origin (and optionally the session cookie)
    SetServer(SetServerArgs),
}

#[derive(Args)]
pub struct SetServerArgs {
    /// Origin, e.g. https://photos.example
    pub url: String,
    /// Session cookie sent with every request
    #[arg(long)]
    pub cookie: Option<String>,
}
