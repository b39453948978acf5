use clap::{Args, Parser, Subcommand};
use jyotish::BirthRecord;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Sidereal birth chart calculator")]
pub(crate) struct Cli {
    /// Config file (default: jyotish.toml, then configs/jyotish.toml).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the configured ayanamsa (lahiri, krishnamurti, raman, ...).
    #[arg(long, global = true)]
    pub ayanamsa: Option<String>,

    /// Pretty-print the JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Full chart: ascendant, houses, bodies, aspects and dashas.
    Chart(BirthArgs),
    /// Classified body positions only.
    Planets(BirthArgs),
    /// Sidereal ascendant.
    Ascendant(BirthArgs),
    /// Whole-Sign houses.
    Houses(BirthArgs),
    /// Vimshottari dasha schedule.
    Dashas {
        #[command(flatten)]
        birth: BirthArgs,

        /// Also report the period in force at this RFC 3339 instant.
        #[arg(long)]
        at: Option<String>,
    },
    /// Nakshatra of one body.
    Nakshatra {
        #[command(flatten)]
        birth: BirthArgs,

        /// Body name, e.g. moon, rahu, ketu.
        #[arg(long)]
        body: String,
    },
}

impl Command {
    pub fn birth(&self) -> &BirthArgs {
        match self {
            Command::Chart(birth)
            | Command::Planets(birth)
            | Command::Ascendant(birth)
            | Command::Houses(birth) => birth,
            Command::Dashas { birth, .. } | Command::Nakshatra { birth, .. } => birth,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub(crate) struct BirthArgs {
    /// Birth date, YYYY-MM-DD.
    #[arg(long)]
    pub date: String,

    /// Local clock time, HH:MM or HH:MM:SS.
    #[arg(long)]
    pub time: String,

    /// IANA zone or fixed offset (Asia/Kolkata, +05:30, UTC).
    #[arg(long, default_value = "UTC")]
    pub tz: String,

    /// Latitude in degrees, north positive.
    #[arg(long, allow_hyphen_values = true)]
    pub lat: f64,

    /// Longitude in degrees, east positive.
    #[arg(long, allow_hyphen_values = true)]
    pub lon: f64,
}

impl BirthArgs {
    pub fn to_record(&self) -> BirthRecord {
        BirthRecord {
            date: self.date.clone(),
            time: self.time.clone(),
            timezone: self.tz.clone(),
            latitude: self.lat,
            longitude: self.lon,
        }
    }
}
