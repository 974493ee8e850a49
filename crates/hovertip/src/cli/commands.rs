use anyhow::{Context, Result};
use clap::Parser;
use hovertipapp::api::Hovertip;
use hovertipapp::config::TooltipSettings;
use hovertipapp::model::{Actor, Token};
use hovertipapp::placement::TokenRect;
use hovertipapp::visibility::Viewer;
use std::path::Path;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use super::render::{render_anchor, render_settings, render_tooltip};
use super::setup::{Cli, Commands, DispositionArg};

const LOG_ENV: &str = "HOVERTIP_LOG";

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let settings = TooltipSettings::load(cli.settings.as_deref())?;
    debug!(path = ?cli.settings, "settings loaded");

    match cli.command {
        Commands::Show {
            actor,
            system,
            user,
            gm,
            token_name,
            disposition,
            json,
            at,
            viewport_width,
            scale,
        } => handle_show(
            ShowArgs {
                actor: &actor,
                system: &system,
                user,
                gm,
                token_name,
                disposition,
                json,
                at,
                viewport_width,
                scale,
            },
            settings,
        ),
        Commands::Settings => handle_settings(&settings),
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    if let Err(err) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
    {
        debug!(%err, "keeping the existing tracing subscriber");
    }
}

struct ShowArgs<'a> {
    actor: &'a Path,
    system: &'a str,
    user: String,
    gm: bool,
    token_name: Option<String>,
    disposition: DispositionArg,
    json: bool,
    at: Option<TokenRect>,
    viewport_width: f64,
    scale: f64,
}

fn handle_show(args: ShowArgs<'_>, settings: TooltipSettings) -> Result<()> {
    let actor = Actor::load(args.actor)
        .with_context(|| format!("Failed to read actor from {}", args.actor.display()))?;
    let mut api = Hovertip::for_system(args.system, settings)?;

    let name = args.token_name.unwrap_or_else(|| actor.name.clone());
    let token = Token::new(name, Some(actor)).with_disposition(args.disposition.into());
    let viewer = if args.gm {
        Viewer::gm(args.user)
    } else {
        Viewer::player(args.user)
    };

    let tooltip = api.on_hover_start(&token, &viewer).cloned();
    let anchor = match (&tooltip, args.at) {
        (Some(_), Some(rect)) => Some(api.anchor(rect, args.viewport_width, args.scale)),
        _ => None,
    };
    if args.json {
        let out = match anchor {
            Some(anchor) => serde_json::json!({ "tooltip": tooltip, "anchor": anchor }),
            None => serde_json::to_value(&tooltip)?,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        print!("{}", render_tooltip(tooltip.as_ref()));
        if let Some(anchor) = anchor {
            print!("{}", render_anchor(&anchor));
        }
    }
    api.on_hover_end();
    Ok(())
}

fn handle_settings(settings: &TooltipSettings) -> Result<()> {
    print!("{}", render_settings(settings)?);
    Ok(())
}
