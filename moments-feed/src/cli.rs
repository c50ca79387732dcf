//! Command-line interface

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Browse and share music moments
#[derive(Parser, Debug)]
#[command(name = "moments-feed")]
#[command(about = "Music moments feed client")]
#[command(version)]
pub struct Cli {
    /// Backend base URL (overrides MOMENTS_API_URL and the config file)
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Admin bearer token (overrides MOMENTS_ADMIN_TOKEN and the config file)
    #[arg(long, global = true, value_name = "TOKEN")]
    pub token: Option<String>,

    /// Config file path
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render one page of the feed
    Feed(FeedArgs),

    /// Show one moment
    Show {
        moment_id: String,
    },

    /// Show the moment shared for a song
    Song {
        song_id: String,
    },

    /// Like a moment and reload the feed
    Like {
        moment_id: String,
    },

    /// Share a song: creates its moment, or appends a listen to it
    Share(ShareArgs),

    /// Replace a moment's fields
    Update(UpdateArgs),

    /// Delete a moment
    Delete {
        moment_id: String,
    },

    /// Delete a comment from a moment
    DeleteComment {
        moment_id: String,
        comment_id: String,
    },

    /// List the known tags, years and periods
    Filters,
}

#[derive(Args, Debug)]
pub struct FeedArgs {
    /// Page number (1-based)
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Tag filter, repeatable
    #[arg(long = "tag", value_name = "TAG")]
    pub tags: Vec<String>,

    /// Energy filter, -5..=5; 0 disables it
    #[arg(long, allow_hyphen_values = true)]
    pub energy: Option<i32>,

    /// First-heard year filter, repeatable
    #[arg(long = "year", value_name = "YEAR")]
    pub years: Vec<i32>,

    /// First-heard period filter, repeatable
    #[arg(long = "period", value_name = "PERIOD")]
    pub periods: Vec<String>,

    /// Card columns
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u8).range(1..=2))]
    pub columns: u8,

    /// Render the navigation sidebar
    #[arg(long)]
    pub nav: bool,
}

#[derive(Args, Debug)]
pub struct ShareArgs {
    pub song_id: String,

    #[arg(long)]
    pub content: String,

    /// Tag, repeatable; commas split into several tags
    #[arg(long = "tag", value_name = "TAG")]
    pub tags: Vec<String>,

    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    pub energy: i32,

    #[arg(long)]
    pub year: Option<String>,

    #[arg(long)]
    pub period: Option<String>,

    /// Listen date for an appended listen, YYYY-MM-DD (default today)
    #[arg(long)]
    pub listen_date: Option<String>,

    #[arg(long)]
    pub location: Option<String>,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    pub moment_id: String,

    #[arg(long)]
    pub content: Option<String>,

    /// Replaces all tags when given
    #[arg(long = "tag", value_name = "TAG")]
    pub tags: Vec<String>,

    #[arg(long, allow_hyphen_values = true)]
    pub energy: Option<i32>,

    #[arg(long)]
    pub year: Option<i32>,

    #[arg(long)]
    pub period: Option<String>,
}
