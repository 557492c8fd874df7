//! Command-line front end
//!
//! Replays recorded pointer gestures against a photo and drives the same
//! session the interactive canvas uses.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow, bail};
use chrono::NaiveDate;
use clap::{ArgAction, Args, Parser, Subcommand};
use serde::Deserialize;

use crate::capture::SourceImage;
use crate::catalog::{FilterOptions, furniture_bundle, residence_message, sample_catalog};
use crate::config::HomesCanvasConfig;
use crate::domain::{DisplayRect, Point};
use crate::engine::{AiClient, ResultImage};
use crate::normalize::normalize;
use crate::profile::{Mood, ProfileStore, ResidenceType};
use crate::render::write_png;
use crate::selector::PointerInput;
use crate::session::{CanvasMsg, CanvasSession, PointerMsg};
use crate::vote::{MessageTemplate, VoteContent, VoteSelection};

#[derive(Parser, Debug)]
#[command(
    name = "homes-canvas",
    version,
    about = "Circle areas of a room photo and ask the AI interior service to redesign them"
)]
pub struct Cli {
    /// Config file (default: platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Replay gestures and print the normalized regions
    Select(SelectArgs),
    /// Replay gestures and submit the edit to the AI service
    Submit(SubmitArgs),
    /// Recommend a furniture bundle
    Furniture(FurnitureArgs),
    /// Build the feed message asking friends to pick one of two products
    Vote(VoteArgs),
    /// Show or update the stored persona
    Profile(ProfileArgs),
    /// Print the effective configuration
    Config(ConfigArgs),
}

#[derive(Args, Debug)]
struct CanvasArgs {
    /// Room photo
    image: PathBuf,
    /// Gesture script (JSON)
    #[arg(long)]
    gestures: PathBuf,
    /// Write the snapshot PNG here
    #[arg(long)]
    snapshot_out: Option<PathBuf>,
    /// Write the photo with region outlines here
    #[arg(long)]
    overlay_out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct SelectArgs {
    #[command(flatten)]
    canvas: CanvasArgs,
}

#[derive(Args, Debug)]
struct SubmitArgs {
    #[command(flatten)]
    canvas: CanvasArgs,
    /// AI interior endpoint
    #[arg(long)]
    endpoint: Option<String>,
    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,
    /// Where to write the generated image (default: result.<ext>)
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct FurnitureArgs {
    /// Residence type: monthly, yearly or own (default: stored profile)
    #[arg(long)]
    residence: Option<ResidenceType>,
    /// Budget in units of 10,000 KRW (default: stored profile)
    #[arg(long)]
    budget: Option<u32>,
    /// Mood tags to match (repeatable)
    #[arg(long = "mood")]
    moods: Vec<Mood>,
}

#[derive(Args, Debug)]
struct VoteArgs {
    /// Catalogue id of a product to compare (give exactly two)
    #[arg(long = "pick", required = true)]
    picks: Vec<String>,
    #[arg(long, default_value = "Which one suits my room?")]
    title: String,
}

#[derive(Args, Debug)]
struct ProfileArgs {
    /// Profile file (default: platform data dir)
    #[arg(long)]
    file: Option<PathBuf>,
    #[arg(long)]
    nickname: Option<String>,
    /// Toggle a mood (repeatable, at most 3 picked)
    #[arg(long = "mood")]
    moods: Vec<Mood>,
    #[arg(long)]
    residence: Option<ResidenceType>,
    /// Budget in units of 10,000 KRW
    #[arg(long)]
    budget: Option<u32>,
    /// Move-in date (YYYY-MM-DD)
    #[arg(long)]
    move_in: Option<NaiveDate>,
}

#[derive(Args, Debug)]
struct ConfigArgs {
    /// Write the default configuration to the config file
    #[arg(long, action = ArgAction::SetTrue)]
    write_defaults: bool,
}

/// Recorded pointer gestures over a displayed photo
#[derive(Debug, Clone, Deserialize)]
pub struct GestureScript {
    /// On-screen box of the photo when the script starts
    pub display: DisplayRect,
    pub events: Vec<GestureEvent>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GestureEvent {
    Down { x: f32, y: f32 },
    Move { x: f32, y: f32 },
    Up { x: f32, y: f32 },
    TouchStart { touches: Vec<Point> },
    TouchMove { touches: Vec<Point> },
    TouchEnd {
        #[serde(default)]
        touches: Vec<Point>,
    },
    Leave,
    Reset,
    /// The photo was laid out again, e.g. after a window resize
    Resize { display: DisplayRect },
}

impl GestureScript {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Feed every event to the session
    pub fn replay(&self, session: &mut CanvasSession) -> anyhow::Result<()> {
        let mut display = self.display;
        for event in &self.events {
            let msg = match event {
                GestureEvent::Down { x, y } => CanvasMsg::down(PointerInput::mouse(*x, *y), display),
                GestureEvent::Move { x, y } => {
                    CanvasMsg::moved(PointerInput::mouse(*x, *y), display)
                }
                GestureEvent::Up { x, y } => CanvasMsg::up(PointerInput::mouse(*x, *y), display),
                GestureEvent::TouchStart { touches } => {
                    CanvasMsg::down(PointerInput::touch(touches.iter().copied()), display)
                }
                GestureEvent::TouchMove { touches } => {
                    CanvasMsg::moved(PointerInput::touch(touches.iter().copied()), display)
                }
                GestureEvent::TouchEnd { touches } => {
                    CanvasMsg::up(PointerInput::touch(touches.iter().copied()), display)
                }
                GestureEvent::Leave => CanvasMsg::Pointer(PointerMsg::Leave),
                GestureEvent::Reset => CanvasMsg::ResetRegions,
                GestureEvent::Resize { display: next } => {
                    display = *next;
                    continue;
                }
            };
            session.update(msg)?;
        }
        log::debug!("Replayed {} event(s)", self.events.len());
        Ok(())
    }
}

fn load_config(path: Option<&Path>) -> HomesCanvasConfig {
    match path {
        Some(path) => HomesCanvasConfig::load_or_default(path),
        None => HomesCanvasConfig::load(),
    }
}

/// Load the photo, replay the script and capture the snapshot
fn prepare(config: HomesCanvasConfig, args: &CanvasArgs) -> anyhow::Result<CanvasSession> {
    let image = SourceImage::open(&args.image)?;
    let script = GestureScript::load(&args.gestures)?;

    let mut session = CanvasSession::new(config);
    session.update(CanvasMsg::LoadImage(image))?;
    script.replay(&mut session)?;
    session.update(CanvasMsg::Confirm)?;

    if let Some(path) = &args.overlay_out
        && let Some(overlay) = session.overlay()
    {
        let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
        write_png(BufWriter::new(file), &overlay)?;
        log::info!("Overlay written to {}", path.display());
    }
    if let Some(path) = &args.snapshot_out
        && let Some(snapshot) = session.snapshot()
    {
        std::fs::write(path, &snapshot.png)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        log::info!("Snapshot written to {}", path.display());
    }
    Ok(session)
}

fn print_json(value: &impl serde::Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn select(config: HomesCanvasConfig, args: &SelectArgs) -> anyhow::Result<()> {
    let axis = config.axis;
    let session = prepare(config, &args.canvas)?;
    let snapshot = session
        .snapshot()
        .ok_or_else(|| anyhow!("No snapshot was captured"))?;
    let circles = normalize(
        session.regions(),
        snapshot.frame.width,
        snapshot.frame.height,
        axis,
    );
    print_json(&serde_json::json!({
        "imageWidth": snapshot.frame.width,
        "imageHeight": snapshot.frame.height,
        "circles": circles,
    }))
}

async fn submit(mut config: HomesCanvasConfig, args: &SubmitArgs) -> anyhow::Result<()> {
    if let Some(endpoint) = &args.endpoint {
        config.endpoint = endpoint.clone();
    }
    if let Some(secs) = args.timeout {
        config.request_timeout_secs = secs;
    }
    let client = AiClient::from_config(&config)?;
    let mut session = prepare(config, &args.canvas)?;

    let pending = session
        .begin_submit()
        .map_err(|err| anyhow!(err.user_message()))?;
    let abort = pending.abort_handle();
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::warn!("Interrupted, cancelling request");
            abort.abort();
        }
    });
    eprintln!("Generating at {} ...", client.endpoint());
    let completed = pending.run(&client).await;
    interrupt.abort();

    let outcome = session
        .finish_submit(completed)
        .map_err(|err| anyhow!(err.user_message()))?;

    match &outcome.after {
        ResultImage::Url(url) => println!("{url}"),
        ResultImage::Embedded(image) => {
            let bytes = image
                .decode()
                .context("Result image is not valid base64")?;
            let path = args
                .out
                .clone()
                .unwrap_or_else(|| PathBuf::from(format!("result.{}", image.extension())));
            std::fs::write(&path, bytes)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("{}", path.display());
        }
    }
    Ok(())
}

fn profile_store(file: Option<&Path>) -> anyhow::Result<ProfileStore> {
    match file {
        Some(path) => Ok(ProfileStore::at(path)),
        None => ProfileStore::open_default().ok_or_else(|| anyhow!("No data directory available")),
    }
}

fn furniture(args: &FurnitureArgs) -> anyhow::Result<()> {
    let stored = if args.residence.is_none() || args.budget.is_none() {
        profile_store(None)?.load()
    } else {
        Default::default()
    };
    let Some(residence_type) = args.residence.or(stored.residence_type) else {
        bail!("No residence type given and none stored in the profile");
    };
    let options = FilterOptions {
        residence_type,
        budget: args.budget.unwrap_or(stored.budget),
        moods: if args.moods.is_empty() {
            stored.moods
        } else {
            args.moods.clone()
        },
    };

    let catalog = sample_catalog();
    let bundle = furniture_bundle(&catalog, &options);
    print_json(&serde_json::json!({
        "message": residence_message(residence_type),
        "bundle": bundle,
    }))
}

fn vote(args: &VoteArgs) -> anyhow::Result<()> {
    let mut selection = VoteSelection::default();
    for id in &args.picks {
        if !selection.toggle(id) {
            log::warn!("Only two products can be compared, ignoring {}", id);
        }
    }
    let catalog = sample_catalog();
    let choices = selection.choices(&catalog)?;
    let template = MessageTemplate::vote(&VoteContent::from_products(args.title.clone(), choices));
    print_json(&template)
}

fn profile(args: &ProfileArgs) -> anyhow::Result<()> {
    let store = profile_store(args.file.as_deref())?;
    let mut profile = store.load();
    let mut changed = false;

    if let Some(nickname) = &args.nickname {
        profile.nickname = nickname.trim().to_string();
        changed = true;
    }
    for mood in &args.moods {
        if !profile.toggle_mood(*mood) {
            log::warn!("At most {} moods can be picked, ignoring {}", crate::profile::MAX_MOODS, mood);
        }
        changed = true;
    }
    if let Some(residence) = args.residence {
        profile.residence_type = Some(residence);
        changed = true;
    }
    if let Some(budget) = args.budget {
        profile.budget = budget;
        changed = true;
    }
    if let Some(date) = args.move_in {
        profile.move_in_date = Some(date);
        changed = true;
    }

    if changed {
        store.save(&profile)?;
    }
    print_json(&profile)
}

fn config(path: Option<&Path>, args: &ConfigArgs) -> anyhow::Result<()> {
    let config = if args.write_defaults {
        let defaults = HomesCanvasConfig::default();
        match path {
            Some(path) => defaults.save_to(path)?,
            None => defaults.save(),
        }
        defaults
    } else {
        load_config(path)
    };
    print_json(&config)
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config_path = cli.config.as_deref();
    match &cli.command {
        Commands::Select(args) => select(load_config(config_path), args),
        Commands::Submit(args) => submit(load_config(config_path), args).await,
        Commands::Furniture(args) => furniture(args),
        Commands::Vote(args) => vote(args),
        Commands::Profile(args) => profile(args),
        Commands::Config(args) => config(config_path, args),
    }
}
