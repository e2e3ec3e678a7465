use clap::{Parser, Subcommand};
use std::path::PathBuf;

use animal_gallery::catalog::Category;

#[derive(Parser, Debug)]
#[command(name = "animal-gallery")]
#[command(about = "Browse animal photos and keep local favorites", long_about = None)]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the browsable animal categories
    Animals,
    /// Show an animal's details and its photos
    Show(ShowArgs),
    /// Mark or unmark a photo as favorite
    Toggle(ToggleArgs),
    /// List favorite photos
    Favorites(FavoritesArgs),
    /// List animal names that have favorites
    Categories,
    /// Print the effective configuration
    Config,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Animal category, e.g. "lion"
    pub category: Category,

    /// Number of photo pages to load
    #[arg(long, default_value_t = 1)]
    pub pages: u32,
}

#[derive(clap::Args, Debug)]
pub struct ToggleArgs {
    /// Category the photo belongs to
    pub category: Category,

    /// Large image URL of the photo
    pub url: String,
}

#[derive(clap::Args, Debug)]
pub struct FavoritesArgs {
    /// Only list favorites of this animal
    #[arg(long)]
    pub animal: Option<String>,

    /// Number of pages to list
    #[arg(long, default_value_t = 1)]
    pub pages: usize,
}
