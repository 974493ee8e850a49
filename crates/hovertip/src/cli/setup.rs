use clap::builder::PossibleValuesParser;
use clap::{Parser, Subcommand, ValueEnum};
use hovertipapp::model::Disposition;
use hovertipapp::placement::TokenRect;
use hovertipapp::systems::SYSTEM_IDS;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "hovertip",
    bin_name = "hovertip",
    version,
    disable_help_subcommand = true
)]
#[command(about = "Preview token hover tooltips in the terminal", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Settings file (TOML)
    #[arg(long, global = true, help_heading = "Options")]
    pub settings: Option<PathBuf>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the tooltip a viewer would get when hovering an actor's token
    Show {
        /// Actor JSON file
        actor: PathBuf,

        /// Game system the actor data belongs to
        #[arg(
            long,
            default_value = "dnd5e",
            value_parser = PossibleValuesParser::new(SYSTEM_IDS.iter().copied())
        )]
        system: String,

        /// Viewing user id, checked against the actor's ownership table
        #[arg(long, default_value = "player")]
        user: String,

        /// View as a game master
        #[arg(long)]
        gm: bool,

        /// Token name (defaults to the actor name)
        #[arg(long)]
        token_name: Option<String>,

        /// Token disposition
        #[arg(long, value_enum, default_value_t = DispositionArg::Neutral)]
        disposition: DispositionArg,

        /// Print the tooltip as JSON
        #[arg(long)]
        json: bool,

        /// Token position and width on the canvas, also prints where the tooltip opens
        #[arg(long, value_name = "X,Y,WIDTH", value_parser = parse_token_rect)]
        at: Option<TokenRect>,

        /// Viewport width in pixels, used with --at
        #[arg(long, default_value_t = 1920.0)]
        viewport_width: f64,

        /// Canvas zoom, used with --at
        #[arg(long, default_value_t = 1.0)]
        scale: f64,
    },

    /// Print the effective settings
    Settings,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum DispositionArg {
    Hostile,
    Neutral,
    Friendly,
}

impl From<DispositionArg> for Disposition {
    fn from(arg: DispositionArg) -> Self {
        match arg {
            DispositionArg::Hostile => Disposition::Hostile,
            DispositionArg::Neutral => Disposition::Neutral,
            DispositionArg::Friendly => Disposition::Friendly,
        }
    }
}

fn parse_token_rect(s: &str) -> Result<TokenRect, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let [x, y, width] = parts.as_slice() else {
        return Err(format!("expected X,Y,WIDTH, got '{}'", s));
    };
    let number = |part: &str| {
        part.parse::<f64>().map_err(|_| format!("'{}' is not a number", part))
    };
    Ok(TokenRect {
        x: number(x)?,
        y: number(y)?,
        width: number(width)?,
    })
}
