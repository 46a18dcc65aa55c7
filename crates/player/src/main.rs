//! player-cli - mount a player into a blank document and print the result.

use anyhow::Result;
use clap::{Parser, ValueEnum};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use common::PlayerError;
use dom::serializer::{serialize_outer_html_with_options, SerializeOptions};
use dom::Document;
use player::{MediaElementFactory, MediaKind, PlayerHandle, PlayerOptions};

/// Mount a video or audio player and dump the resulting markup
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Player kind
    #[arg(value_enum)]
    kind: Kind,

    /// Media source locator
    src: String,

    /// Player options as a JSON object
    #[arg(long)]
    options: Option<String>,

    /// CSS width override
    #[arg(long)]
    width: Option<String>,

    /// CSS height override
    #[arg(long)]
    height: Option<String>,

    /// Hide native controls
    #[arg(long)]
    no_controls: bool,

    /// Skip the overlay buttons
    #[arg(long)]
    no_overlay: bool,

    /// Volume handed to the player after mounting
    #[arg(long)]
    volume: Option<f64>,

    /// Actions to run in order
    #[arg(long = "action", value_enum)]
    actions: Vec<Action>,

    /// Indent the printed markup
    #[arg(long)]
    pretty: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Kind {
    Video,
    Audio,
}

impl From<Kind> for MediaKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Video => MediaKind::Video,
            Kind::Audio => MediaKind::Audio,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Action {
    Play,
    Pause,
    Stop,
    ClickPlay,
    ClickPause,
}

fn build_options(args: &Args) -> Result<PlayerOptions> {
    let mut options = match &args.options {
        Some(json) => PlayerOptions::from_json(json)?,
        None => match args.kind {
            Kind::Video => PlayerOptions::video_defaults(),
            Kind::Audio => PlayerOptions::audio_defaults(),
        },
    };

    if let Some(width) = &args.width {
        options = options.with_width(width);
    }
    if let Some(height) = &args.height {
        options = options.with_height(height);
    }
    if args.no_controls {
        options = options.with_controls(false);
    }
    if args.no_overlay {
        options = options.with_overlay_controls(false);
    }
    Ok(options)
}

fn run_action(player: &PlayerHandle, action: Action) -> Result<()> {
    match action {
        Action::Play => player.play(),
        Action::Pause => player.pause(),
        Action::Stop => player.stop(),
        Action::ClickPlay | Action::ClickPause => {
            let overlay = player
                .overlay()
                .ok_or_else(|| PlayerError::invalid("player has no overlay controls"))?;
            let button = if action == Action::ClickPlay {
                overlay.play_button
            } else {
                overlay.pause_button
            };
            player.document().write().click(button);
        }
    }
    let fired = player.document().write().run_pending_events();
    info!("{:?}: {} notification(s)", action, fired);
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("player-cli v{}", player::VERSION);

    let options = build_options(&args)?;

    let mut doc = Document::blank();
    let stage = doc.create_element("div");
    doc.set_attribute(stage, "id", "stage");
    doc.append_to_body(stage);
    let document = doc.into_ref();

    let container = document
        .read()
        .get_element_by_id("stage")
        .ok_or_else(|| PlayerError::not_found("#stage"))?;

    let factory = MediaElementFactory::new(document.clone());
    let player = factory.create(args.kind.into(), &args.src, container, &options);
    document.write().run_pending_events();

    if let Some(level) = args.volume {
        player.set_volume(level);
        if player.volume() != level {
            warn!("volume {} rejected, still {}", level, player.volume());
        }
        document.write().run_pending_events();
    }

    for action in &args.actions {
        run_action(&player, *action)?;
    }

    let serialize_options = if args.pretty {
        SerializeOptions::new().pretty()
    } else {
        SerializeOptions::new()
    };
    let html = serialize_outer_html_with_options(&document.read().tree, container, &serialize_options);
    println!("{}", html);

    Ok(())
}
