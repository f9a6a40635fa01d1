//! Weather dashboard CLI
//!
//! Terminal client for the weather proxy: a live dashboard plus one-shot
//! lookups.

#![allow(clippy::print_stdout)]

mod render;

use std::{
    io::{self, Write},
    sync::Arc,
};

use application::{
    DashboardController, DashboardSettings, SuggestionPort, TemperatureChart, WeatherPort,
};
use clap::{Parser, Subcommand};
use infrastructure::{AppConfig, LogFormat, OpenWeatherAdapter, ProxyAdapter, init_tracing};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};

/// Weather dashboard CLI
#[derive(Parser)]
#[command(name = "weather-dashboard-cli")]
#[command(author, version, about = "Weather dashboard in the terminal", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Weather proxy URL
    #[arg(short, long)]
    url: Option<String>,

    /// OpenWeather API key; suggestions go straight to OpenWeather when set
    #[arg(long, env = "OPENWEATHER_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Start in dark mode
    #[arg(long)]
    dark: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Live dashboard, redrawn every clock tick
    ///
    /// Reads commands from stdin while running:
    /// add <city>, rm <city>, find <query>, pick <n>, theme, quit
    Watch {
        /// Track these cities instead of the configured defaults
        #[arg(short, long = "city")]
        cities: Vec<String>,
    },

    /// Print the card of one city
    Weather {
        /// City name
        city: String,

        /// Print the card as JSON
        #[arg(long)]
        json: bool,
    },

    /// Suggest cities matching a query
    Suggest {
        /// Start of a place name
        query: String,
    },

    /// Print the temperature chart definition as JSON
    Chart {
        /// Temperatures, newest first
        #[arg(default_values_t = vec![25.0, 24.0, 23.0, 22.0])]
        temperatures: Vec<f64>,
    },
}

/// Command typed on stdin during `watch`
#[derive(Debug, Clone, PartialEq)]
enum InputCommand {
    Add(String),
    Remove(String),
    Find(String),
    Pick(usize),
    Theme,
    Quit,
    Unknown(String),
}

impl InputCommand {
    fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let (verb, arg) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(v, a)| (v, a.trim()));

        Some(match verb {
            "add" => Self::Add(arg.to_string()),
            "rm" | "remove" => Self::Remove(arg.to_string()),
            "find" => Self::Find(arg.to_string()),
            "pick" => match arg.parse::<usize>() {
                Ok(n) if n > 0 => Self::Pick(n - 1),
                _ => Self::Unknown(line.to_string()),
            },
            "theme" => Self::Theme,
            "q" | "quit" | "exit" => Self::Quit,
            _ => Self::Unknown(line.to_string()),
        })
    }
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Weather and suggestion ports for the configuration
fn build_ports(
    config: &AppConfig,
) -> anyhow::Result<(Arc<dyn WeatherPort>, Arc<dyn SuggestionPort>)> {
    let proxy = Arc::new(ProxyAdapter::from_config(&config.dashboard)?);
    info!(proxy = %proxy.base_url(), "Using weather proxy");
    let weather: Arc<dyn WeatherPort> = Arc::clone(&proxy) as Arc<dyn WeatherPort>;

    let suggestions: Arc<dyn SuggestionPort> = if config.openweather.has_api_key() {
        info!("Using OpenWeather geocoding directly");
        Arc::new(OpenWeatherAdapter::with_config(config.openweather.clone())?)
    } else {
        proxy
    };

    Ok((weather, suggestions))
}

fn draw(controller: &DashboardController, out: &mut impl Write) -> io::Result<()> {
    let mut screen = render::dashboard(&controller.render(), controller.theme());
    screen.push_str(&render::suggestions(&controller.input(), &controller.suggestions()));
    write!(out, "{}{screen}", render::CLEAR_SCREEN)?;
    out.flush()
}

/// Apply one stdin command; returns false when the user quits
fn apply(controller: &DashboardController, command: InputCommand) -> bool {
    match command {
        InputCommand::Add(city) => {
            controller.add_city(&city);
        },
        InputCommand::Remove(city) => {
            controller.remove_city(&city);
        },
        InputCommand::Find(query) => {
            // Applied on a later redraw
            drop(controller.on_input_change(query));
        },
        InputCommand::Pick(index) => {
            controller.select_suggestion(index);
        },
        InputCommand::Theme => {
            controller.toggle_theme();
        },
        InputCommand::Quit => return false,
        InputCommand::Unknown(line) => debug!(%line, "Ignoring unknown command"),
    }
    true
}

async fn watch(controller: &DashboardController) -> anyhow::Result<()> {
    let mut ticks = controller.subscribe_ticks();
    let mut stdin = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    let mut stdout = io::stdout();
    draw(controller, &mut stdout)?;

    loop {
        tokio::select! {
            changed = ticks.changed() => {
                if changed.is_err() {
                    break;
                }
                let refetching = controller.refresh();
                if refetching > 0 {
                    debug!(refetching, "Refreshing expired cities");
                }
                draw(controller, &mut stdout)?;
            }
            line = stdin.next_line(), if stdin_open => {
                match line? {
                    Some(line) => {
                        if let Some(command) = InputCommand::parse(&line) {
                            if !apply(controller, command) {
                                break;
                            }
                            draw(controller, &mut stdout)?;
                        }
                    },
                    None => stdin_open = false,
                }
            }
            signal = tokio::signal::ctrl_c() => {
                signal?;
                break;
            }
        }
    }

    info!("Stopping dashboard");
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let loaded = AppConfig::load();
    let config = loaded.as_ref().map_or_else(|_| AppConfig::default(), Clone::clone);

    let log_format = config.server.log_format.parse().unwrap_or(LogFormat::Text);
    init_tracing(log_format, log_filter_from_verbosity(cli.verbose))?;
    if let Err(e) = loaded {
        warn!("Failed to load config, using defaults: {}", e);
    }

    let mut config = config.with_api_key(cli.api_key);
    if let Some(url) = cli.url {
        config.dashboard.proxy_url = url;
    }
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {e}"))?;

    let settings = config.dashboard.settings();

    match cli.command {
        Commands::Watch { cities } => {
            let settings = if cities.is_empty() {
                settings
            } else {
                DashboardSettings {
                    default_cities: cities,
                    ..settings
                }
            };
            let (weather, suggestions) = build_ports(&config)?;
            let controller = DashboardController::new(weather, suggestions, settings);
            if cli.dark {
                controller.toggle_theme();
            }

            let result = watch(&controller).await;
            controller.shutdown();
            result?;
        },

        Commands::Weather { city, json } => {
            let (weather, suggestions) = build_ports(&config)?;
            let controller = DashboardController::new(
                weather,
                suggestions,
                DashboardSettings {
                    default_cities: Vec::new(),
                    ..settings
                },
            );
            if cli.dark {
                controller.toggle_theme();
            }

            let card = controller.card(&city).await;
            controller.shutdown();
            let card = card?;

            if json {
                println!("{}", serde_json::to_string_pretty(&card)?);
            } else {
                println!("{}", render::card_box(&card));
            }
        },

        Commands::Suggest { query } => {
            let min_chars = settings.min_query_chars;
            let (weather, suggestions) = build_ports(&config)?;
            let controller = DashboardController::new(
                weather,
                suggestions,
                DashboardSettings {
                    default_cities: Vec::new(),
                    ..settings
                },
            );

            let lookup = controller.on_input_change(query);
            let finished = match lookup {
                Some(handle) => handle.await.map_err(anyhow::Error::from),
                None => {
                    println!("Type at least {min_chars} characters");
                    Ok(())
                },
            };
            controller.shutdown();
            finished?;

            let found = controller.suggestions();
            if found.is_empty() {
                println!("No suggestions");
            }
            for (i, suggestion) in found.iter().enumerate() {
                println!("{}. {suggestion}", i + 1);
            }
        },

        Commands::Chart { temperatures } => {
            let chart = TemperatureChart::new(temperatures);
            println!("{}", serde_json::to_string_pretty(&chart)?);
        },
    }

    Ok(())
}
