//! moments-feed - Music moments feed client
//!
//! Renders the feed page as text and drives the admin operations of the
//! moments backend from the command line. Rendered views go to stdout, logs
//! to stderr.

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use moments_common::config::{self, TomlConfig};
use moments_common::{ApiResponse, EnergyLevel, MomentUpdate};
use moments_feed::cli::{Cli, Command, FeedArgs, ShareArgs, UpdateArgs};
use moments_feed::compose::{ComposeMode, ShareDialog, ShareOutcome, SongRef};
use moments_feed::options::FilterOptions;
use moments_feed::view::{self, Sidebar};
use moments_feed::{
    Credential, FeedLoader, FeedStatus, FilterState, MomentsApi, MomentsClient,
};
use std::sync::Arc;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let toml_config = TomlConfig::load_or_default(cli.config.as_deref())
        .context("Failed to load configuration")?;

    // RUST_LOG wins over the configured level
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&toml_config.logging.level)),
        )
        .with_writer(std::io::stderr)
        .init();

    info!(
        "Starting moments-feed v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let api_url = config::resolve_api_url(cli.api_url.as_deref(), &toml_config);
    let credential =
        config::resolve_admin_token(cli.token.as_deref(), &toml_config).map(Credential::bearer);
    info!("API URL: {}", api_url);
    debug!(authenticated = credential.is_some(), "Credential resolved");

    let client = Arc::new(MomentsClient::new(&api_url, credential)?);

    match cli.command {
        Command::Feed(args) => run_feed(client, args).await,
        Command::Show { moment_id } => {
            let moment = client.get_moment(&moment_id).await?;
            print!("{}", view::render_card(&moment));
            Ok(())
        }
        Command::Song { song_id } => {
            match client.song_moment(&song_id).await?.into_success_data() {
                Some(moment) => print!("{}", view::render_card(&moment)),
                None => println!("这首歌还没有音乐时刻"),
            }
            Ok(())
        }
        Command::Like { moment_id } => {
            let loader = FeedLoader::new(Arc::clone(&client));
            let response = loader.like(&moment_id).await?;
            if let Some(result) = response.data {
                println!("♥ {}", result.like_count);
            }
            print!("{}", view::render_feed(&loader.snapshot().await, 2));
            Ok(())
        }
        Command::Share(args) => run_share(client, args).await,
        Command::Update(args) => run_update(client.as_ref(), args).await,
        Command::Delete { moment_id } => {
            require_success(client.delete_moment(&moment_id).await?, "delete moment")?;
            println!("已删除 {}", moment_id);
            Ok(())
        }
        Command::DeleteComment {
            moment_id,
            comment_id,
        } => {
            require_success(
                client.delete_comment(&moment_id, &comment_id).await?,
                "delete comment",
            )?;
            println!("已删除评论 {}", comment_id);
            Ok(())
        }
        Command::Filters => {
            let options = FilterOptions::load(client.as_ref()).await;
            print!("{}", view::render_filter_bar(&options, &FilterState::new()));
            Ok(())
        }
    }
}

async fn run_feed(client: Arc<MomentsClient>, args: FeedArgs) -> Result<()> {
    let mut filters = FilterState::new();
    filters.set_tags(args.tags);
    if let Some(level) = args.energy {
        filters.set_energy_level(level);
    }
    filters.set_years(args.years);
    filters.set_periods(args.periods);
    filters.set_page(args.page);

    let loader = FeedLoader::new(Arc::clone(&client));
    let (options, _) = tokio::join!(
        FilterOptions::load(client.as_ref()),
        loader.load_filters(&filters)
    );
    let state = loader.snapshot().await;

    if args.nav {
        print!("{}", Sidebar::new("/moments").render());
        println!();
    }
    print!("{}", view::render_filter_bar(&options, &filters));
    println!();
    print!("{}", view::render_feed(&state, usize::from(args.columns)));

    if let FeedStatus::Error(message) = &state.status {
        bail!("Feed failed to load: {}", message);
    }
    Ok(())
}

async fn run_share(client: Arc<MomentsClient>, args: ShareArgs) -> Result<()> {
    let mut dialog = ShareDialog::new(client, SongRef::new(args.song_id));
    let appending = matches!(dialog.open().await, ComposeMode::Append(_));

    let form = dialog.form_mut();
    form.content = args.content;
    for tag in &args.tags {
        form.add_custom_tags(tag);
    }
    form.set_energy_level(args.energy);
    form.first_heard_year = args.year.unwrap_or_default();
    form.first_heard_period = args.period.unwrap_or_default();
    form.listen_date = args.listen_date.unwrap_or_default();
    form.location = args.location.unwrap_or_default();

    if appending {
        info!("Song already has a moment; tags, energy and first-heard fields are ignored");
    }
    print!("{}", view::render_share_dialog(&dialog));

    match dialog.submit().await? {
        ShareOutcome::Created(moment) => {
            println!("已分享");
            if let Some(moment) = moment {
                print!("{}", view::render_card(&moment));
            }
        }
        ShareOutcome::Appended { moment_id, .. } => println!("已添加聆听记录到 {}", moment_id),
    }
    Ok(())
}

async fn run_update<A: MomentsApi + ?Sized>(api: &A, args: UpdateArgs) -> Result<()> {
    let existing = api.get_moment(&args.moment_id).await?;
    let mut update = MomentUpdate::from(&existing);

    if let Some(content) = args.content {
        update.content = content;
    }
    if !args.tags.is_empty() {
        update.tags = args.tags;
    }
    if let Some(level) = args.energy {
        update.energy_level = EnergyLevel::new(level)
            .map(EnergyLevel::value)
            .ok_or_else(|| anyhow!("Energy level {} is outside -5..=5", level))?;
    }
    if args.year.is_some() {
        update.first_heard_year = args.year;
    }
    if args.period.is_some() {
        update.first_heard_period = args.period;
    }

    let response = api.update_moment(&args.moment_id, &update).await?;
    match require_success(response, "update moment")? {
        Some(moment) => print!("{}", view::render_card(&moment)),
        None => println!("已更新 {}", args.moment_id),
    }
    Ok(())
}

fn require_success<T>(response: ApiResponse<T>, action: &str) -> Result<Option<T>> {
    if !response.success {
        let message = response.message.unwrap_or_default();
        warn!(action, message = %message, "Backend reported failure");
        bail!("Failed to {}: {}", action, message);
    }
    Ok(response.data)
}
