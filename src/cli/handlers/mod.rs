use std::path::PathBuf;
use std::time::Duration;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io::{self, ConfigError};
use crate::io::http::{GalleryClient, Rotation};
use crate::io::store::ScratchStore;
use crate::model::{Category, ClientConfig, LatLng, LookupScope};

type CmdResult = Result<(), Box<dyn std::error::Error>>;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Global options shared by every command
struct Context {
    config: ClientConfig,
    config_path: PathBuf,
    store_path: PathBuf,
    json: bool,
}

impl Context {
    fn client(&self) -> Result<GalleryClient, Box<dyn std::error::Error>> {
        Ok(GalleryClient::new(&self.config.server)?)
    }

    fn store(&self) -> ScratchStore {
        ScratchStore::open(&self.store_path)
    }
}

/// Read the config named by `--config` (or the default one) and apply
/// `--server`.
pub fn load_config(cli: &Cli) -> Result<ClientConfig, ConfigError> {
    let path = cli
        .config
        .clone()
        .unwrap_or_else(config_io::default_config_path);
    let mut config = config_io::read_config(&path)?;
    if let Some(url) = &cli.server {
        config.server.url = url.clone();
    }
    Ok(config)
}

pub fn dispatch(cli: Cli) -> CmdResult {
    let ctx = Context {
        config: load_config(&cli)?,
        config_path: cli
            .config
            .clone()
            .unwrap_or_else(config_io::default_config_path),
        store_path: cli.store.clone().unwrap_or_else(ScratchStore::default_path),
        json: cli.json,
    };

    match cli.command {
        None => cmd_tui(&ctx, None),
        Some(cmd) => match cmd {
            Commands::Open(args) => cmd_tui(&ctx, Some(args.id)),

            // Read commands
            Commands::Show(args) => cmd_show(&ctx, args),
            Commands::Suggest(args) => cmd_suggest(&ctx, args),
            Commands::Lastpos => cmd_lastpos(&ctx),

            // Admin commands
            Commands::Rotate(args) => cmd_rotate(&ctx, args),
            Commands::Tag(args) => cmd_tag(&ctx, args),
            Commands::Grade(args) => cmd_grade(&ctx, args),
            Commands::Locate(args) => cmd_locate(&ctx, args),

            Commands::Config(cmd) => match cmd.action {
                ConfigAction::SetServer(args) => cmd_set_server(&ctx, args),
            },
        },
    }
}

fn runtime() -> std::io::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn cmd_tui(ctx: &Context, imgid: Option<u32>) -> CmdResult {
    let client = ctx.client()?;
    let rt = runtime()?;
    crate::tui::run(ctx.config.clone(), client, &rt, ctx.store(), imgid)
}

fn cmd_show(ctx: &Context, args: ImageArg) -> CmdResult {
    let client = ctx.client()?;
    let details = runtime()?.block_on(client.details(args.id))?;
    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&details_to_json(&details))?);
    } else {
        for line in format_details(&details) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn parse_category(name: &str) -> Result<Category, String> {
    Category::parse(name)
        .ok_or_else(|| format!("unknown category '{}' (expected tag, person or place)", name))
}

fn cmd_suggest(ctx: &Context, args: SuggestArgs) -> CmdResult {
    let scope = match &args.category {
        Some(name) => LookupScope::Category(parse_category(name)?),
        None => LookupScope::Global,
    };
    let client = ctx.client()?;
    let timeout = Duration::from_millis(ctx.config.lookup.timeout_ms);
    let suggestions = runtime()?.block_on(client.suggest(scope, &args.query, timeout))?;

    if ctx.json {
        let out: Vec<SuggestionJson> = suggestions.iter().map(suggestion_to_json).collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        let with_kind = scope == LookupScope::Global;
        for s in &suggestions {
            println!("{}", format_suggestion(s, with_kind));
        }
    }
    Ok(())
}

fn cmd_lastpos(ctx: &Context) -> CmdResult {
    let Some(pos) = ctx.store().last_position() else {
        return Err("no position submitted yet".into());
    };
    if ctx.json {
        let out = PositionJson {
            lat: pos.lat,
            lng: pos.lng,
        };
        println!("{}", serde_json::to_string(&out)?);
    } else {
        println!("{}", pos.to_json());
    }
    Ok(())
}

fn cmd_rotate(ctx: &Context, args: RotateArgs) -> CmdResult {
    let rotation = Rotation::parse(&args.direction).ok_or_else(|| {
        format!(
            "invalid rotation '{}' (expected left, right or an angle)",
            args.direction
        )
    })?;
    let client = ctx.client()?;
    runtime()?.block_on(client.rotate(args.id, rotation))?;
    println!("rotated /img/{} by {}", args.id, rotation.angle());
    Ok(())
}

fn cmd_tag(ctx: &Context, args: TagArgs) -> CmdResult {
    let category = parse_category(&args.category)?;
    let names: Vec<String> = args
        .names
        .iter()
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .collect();
    if names.is_empty() {
        return Err("nothing to attach".into());
    }
    let client = ctx.client()?;
    runtime()?.block_on(client.attach(args.id, category, &names))?;
    println!(
        "{} /img/{}: {}",
        category.title(),
        args.id,
        names.join(", ")
    );
    Ok(())
}

fn cmd_grade(ctx: &Context, args: GradeArgs) -> CmdResult {
    let client = ctx.client()?;
    runtime()?.block_on(client.grade(args.id, args.grade))?;
    println!("graded /img/{} {}", args.id, args.grade);
    Ok(())
}

fn cmd_locate(ctx: &Context, args: LocateArgs) -> CmdResult {
    if !(-90.0..=90.0).contains(&args.lat) || !(-180.0..=180.0).contains(&args.lng) {
        return Err(format!("position out of range: {}, {}", args.lat, args.lng).into());
    }
    let pos = LatLng::new(args.lat, args.lng);
    let client = ctx.client()?;
    runtime()?.block_on(client.locate(args.id, pos))?;
    // Same bookkeeping as the location form
    ctx.store().remember_position(pos)?;
    println!("located /img/{} at {}", args.id, pos);
    Ok(())
}

fn cmd_set_server(ctx: &Context, args: SetServerArgs) -> CmdResult {
    // Validate before touching the file
    let mut server = ctx.config.server.clone();
    server.url = args.url.clone();
    GalleryClient::new(&server)?;

    let mut doc = config_io::read_config_doc(&ctx.config_path)?;
    config_io::set_server_url(&mut doc, &args.url);
    if args.cookie.is_some() {
        config_io::set_server_cookie(&mut doc, args.cookie.as_deref());
    }
    config_io::write_config_doc(&ctx.config_path, &doc)?;
    println!("server set to {} in {}", args.url, ctx.config_path.display());
    Ok(())
}
