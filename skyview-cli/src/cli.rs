use anyhow::{Context, bail};
use clap::{Parser, Subcommand, ValueEnum};
use inquire::{Confirm, CustomType, InquireError, Select, Text};
use skyview_core::{
    Config, ConfiguredGeolocator, Coordinates, FixedGeolocator, PreferenceStore, Session, Units,
    WeatherClient,
};

use crate::render::DashboardView;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skyview", version, about = "Terminal weather dashboard")]
pub struct Cli {
    /// Use the dark theme.
    #[arg(long, global = true)]
    pub dark: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show weather for a city.
    Show {
        /// City name, e.g. "Paris" or "New York".
        #[arg(required = true, num_args = 1..)]
        city: Vec<String>,
    },

    /// Show weather for your current location.
    Here {
        /// Latitude in degrees; overrides the configured location.
        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,

        /// Longitude in degrees; overrides the configured location.
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,
    },

    /// List recent searches, or show weather for one of them.
    Recent {
        /// 1-based position in the list.
        index: Option<usize>,
    },

    /// Set the display units, or toggle them when no system is given.
    Units {
        #[arg(value_enum)]
        system: Option<UnitSystem>,
    },

    /// Configure the location used by `here` and the request timeout.
    Configure,

    /// Search repeatedly from a prompt.
    Interactive,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum UnitSystem {
    Metric,
    Imperial,
}

impl From<UnitSystem> for Units {
    fn from(value: UnitSystem) -> Self {
        match value {
            UnitSystem::Metric => Units::METRIC,
            UnitSystem::Imperial => Units::IMPERIAL,
        }
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = Config::load()?;

        match self.command {
            Command::Configure => configure(config),
            Command::Units { system } => {
                let session = open_session(&config)?;
                let units = match system {
                    Some(system) => {
                        session.set_units(system.into());
                        system.into()
                    }
                    None => session.toggle_units(),
                };
                println!("Units: {}, {}", units.temperature.glyph(), units.speed.glyph());
                Ok(())
            }
            Command::Recent { index: None } => {
                let session = open_session(&config)?;
                let recent = session.recent_searches();
                if recent.is_empty() {
                    println!("No recent searches.");
                }
                for (i, location) in recent.entries().iter().enumerate() {
                    println!("{}. {}", i + 1, location.display_name());
                }
                Ok(())
            }
            Command::Recent { index: Some(index) } => {
                let session = open_session(&config)?;
                session.set_dark(self.dark);
                let location = index
                    .checked_sub(1)
                    .and_then(|i| session.recent_searches().get(i).cloned())
                    .with_context(|| format!("No recent search at position {index}"))?;
                let _ = session.select(location).await;
                show(&session)
            }
            Command::Show { city } => {
                let session = open_session(&config)?;
                session.set_dark(self.dark);
                let _ = session.search(&city.join(" ")).await;
                show(&session)
            }
            Command::Here { lat, lon } => {
                let session = open_session(&config)?;
                session.set_dark(self.dark);
                let _ = match (lat, lon) {
                    (Some(lat), Some(lon)) => {
                        session.locate(&FixedGeolocator(Coordinates::new(lat, lon))).await
                    }
                    _ => {
                        session
                            .locate(&ConfiguredGeolocator::new(config.location.clone()))
                            .await
                    }
                };
                show(&session)
            }
            Command::Interactive => {
                let session = open_session(&config)?;
                session.set_dark(self.dark);
                interactive(&session, &config).await
            }
        }
    }
}

fn open_session(config: &Config) -> anyhow::Result<Session> {
    let client = WeatherClient::from_config(config).context("Failed to create HTTP client")?;

    let store = match PreferenceStore::open_default() {
        Ok(store) => Some(store),
        Err(e) => {
            tracing::warn!(error = %e, "no data directory; recent searches and units won't persist");
            None
        }
    };

    Ok(Session::new(client, store))
}

/// Print the dashboard, failing the command if the last action failed.
fn show(session: &Session) -> anyhow::Result<()> {
    let dash = session.dashboard();
    if let Some(message) = dash.error() {
        bail!("{message}");
    }
    print!("{}", DashboardView(&dash));
    Ok(())
}

const INTERACTIVE_HELP: &str =
    "city name, :here, :recent, :units, :theme, or :q to quit";

async fn interactive(session: &Session, config: &Config) -> anyhow::Result<()> {
    print!("{}", DashboardView(&session.dashboard()));

    loop {
        let input = match Text::new("Search for a city:").with_help_message(INTERACTIVE_HELP).prompt()
        {
            Ok(input) => input,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e.into()),
        };

        match input.trim() {
            "" => continue,
            ":q" | ":quit" => break,
            ":units" => {
                session.toggle_units();
            }
            ":theme" => {
                session.toggle_theme();
            }
            ":here" => {
                let geolocator = ConfiguredGeolocator::new(config.location.clone());
                let _ = session.locate(&geolocator).await;
            }
            ":recent" => {
                let recent = session.recent_searches();
                if recent.is_empty() {
                    println!("No recent searches.");
                    continue;
                }
                let options: Vec<String> =
                    recent.entries().iter().map(|l| l.display_name()).collect();
                let picked = match Select::new("Recent searches:", options).raw_prompt() {
                    Ok(picked) => picked,
                    Err(InquireError::OperationCanceled) => continue,
                    Err(e) => return Err(e.into()),
                };
                if let Some(location) = recent.get(picked.index).cloned() {
                    let _ = session.select(location).await;
                }
            }
            query => {
                let _ = session.search(query).await;
            }
        }

        println!();
        print!("{}", DashboardView(&session.dashboard()));
    }

    Ok(())
}

fn configure(mut config: Config) -> anyhow::Result<()> {
    config.location.enabled = Confirm::new("Allow `skyview here` to use a home location?")
        .with_default(config.location.enabled)
        .prompt()?;

    if config.location.enabled {
        let latitude = CustomType::<f64>::new("Latitude (degrees, -90..90):")
            .with_error_message("Please type a number")
            .prompt()?;
        let longitude = CustomType::<f64>::new("Longitude (degrees, -180..180):")
            .with_error_message("Please type a number")
            .prompt()?;

        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            bail!("Coordinates out of range: {latitude}, {longitude}");
        }
        config.set_home(Coordinates::new(latitude, longitude));
    }

    let timeout = Text::new("Request timeout in seconds (blank for none):")
        .with_default(&config.timeout_secs.map(|s| s.to_string()).unwrap_or_default())
        .prompt()?;
    config.timeout_secs = match timeout.trim() {
        "" => None,
        secs => Some(secs.parse().with_context(|| format!("Invalid timeout '{secs}'"))?),
    };

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_joins_city_words() {
        let cli = Cli::try_parse_from(["skyview", "show", "New", "York"]).expect("parse");
        match cli.command {
            Command::Show { city } => assert_eq!(city.join(" "), "New York"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn here_accepts_negative_coordinates() {
        let cli = Cli::try_parse_from(["skyview", "here", "--lat", "-33.87", "--lon", "151.21"])
            .expect("parse");
        match cli.command {
            Command::Here { lat, lon } => {
                assert_eq!(lat, Some(-33.87));
                assert_eq!(lon, Some(151.21));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn here_requires_both_coordinates() {
        assert!(Cli::try_parse_from(["skyview", "here", "--lat", "1.0"]).is_err());
    }

    #[test]
    fn dark_flag_is_global() {
        let cli = Cli::try_parse_from(["skyview", "show", "Oslo", "--dark"]).expect("parse");
        assert!(cli.dark);
    }

    #[test]
    fn unit_system_maps_to_units() {
        let cli = Cli::try_parse_from(["skyview", "units", "imperial"]).expect("parse");
        match cli.command {
            Command::Units { system: Some(system) } => {
                assert_eq!(Units::from(system), Units::IMPERIAL)
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
