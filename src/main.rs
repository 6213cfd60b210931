use clap::{Parser, Subcommand, ValueEnum};
use log::{error, info};
use persian_date_indicator::calendar::{Clock, Locale, SystemClock};
use persian_date_indicator::config::constants::LOCALE_ENV;
use persian_date_indicator::config::{locale_override, Config};
use persian_date_indicator::icon::{IconRenderer, IconStyle};
use persian_date_indicator::indicator::date_labels;
use persian_date_indicator::{daemon, logging, IndicatorError, Result};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "persian-date-indicator")]
#[command(about = "Shows today's Persian (Jalali) date in the system tray")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the tray indicator in the foreground
    Run,

    /// Print today's date
    Today,

    /// Write the tray icon for a day of month to a PNG file
    Render {
        /// Day of month (1-31)
        #[arg(long)]
        day: u32,

        /// Output PNG path
        #[arg(long, short)]
        output: PathBuf,
    },

    /// Stop the running indicator
    Stop,

    /// Configure the indicator
    Config {
        /// Show current configuration
        #[arg(long, short)]
        show: bool,

        /// Seconds between date checks
        #[arg(long)]
        check_interval: Option<u64>,

        /// Seconds between unconditional tray refreshes
        #[arg(long)]
        force_interval: Option<u64>,

        /// Show the Gregorian date in the menu
        #[arg(long)]
        gregorian: Option<bool>,

        /// Language for names and digits
        #[arg(long, value_enum)]
        locale: Option<Locale>,

        /// Tray icon style
        #[arg(long, value_enum)]
        icon_style: Option<IconStyle>,

        /// Label format, e.g. "%A, %d %B %Y"
        #[arg(long)]
        format: Option<String>,
    },
}

struct ConfigChanges {
    check_interval: Option<u64>,
    force_interval: Option<u64>,
    gregorian: Option<bool>,
    locale: Option<Locale>,
    icon_style: Option<IconStyle>,
    format: Option<String>,
}

impl ConfigChanges {
    fn is_empty(&self) -> bool {
        self.check_interval.is_none()
            && self.force_interval.is_none()
            && self.gregorian.is_none()
            && self.locale.is_none()
            && self.icon_style.is_none()
            && self.format.is_none()
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize configuration to get log file path
    let config = Config::new()?;

    // Initialize logger with file output
    logging::init_logging(&config.paths().log_file)?;

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Run) | None => run(config).await,
        Some(Commands::Today) => today(&config),
        Some(Commands::Render { day, output }) => render(&config, day, output),
        Some(Commands::Stop) => stop(&config),
        Some(Commands::Config {
            show,
            check_interval,
            force_interval,
            gregorian,
            locale,
            icon_style,
            format,
        }) => configure(
            &config,
            show,
            ConfigChanges {
                check_interval,
                force_interval,
                gregorian,
                locale,
                icon_style,
                format,
            },
        ),
    }
}

async fn run(config: Config) -> Result<()> {
    let daemon = daemon::Daemon::new(config);
    daemon.run().await
}

fn today(config: &Config) -> Result<()> {
    let settings = config.settings()?.with_locale_override(locale_override());
    let labels = date_labels(&settings, SystemClock.today())?;

    println!("{}", labels.label);
    if let Some(gregorian) = labels.gregorian {
        println!("{gregorian}");
    }
    Ok(())
}

fn render(config: &Config, day: u32, output: PathBuf) -> Result<()> {
    let settings = config.settings()?;
    let image = IconRenderer::new(settings.colors).render_day(day)?;

    image.save_with_format(&output, image::ImageFormat::Png)?;
    info!("Icon for day {} written to {}", day, output.display());
    println!("Icon written to {}", output.display());
    Ok(())
}

fn stop(config: &Config) -> Result<()> {
    match daemon::stop_running_instance(config.paths()) {
        Ok(true) => println!("Persian date indicator stopped"),
        Ok(false) => println!("Persian date indicator is not running"),
        Err(e) => {
            error!("Failed to stop Persian date indicator: {e}");
            return Err(e);
        }
    }
    Ok(())
}

fn configure(config: &Config, show: bool, changes: ConfigChanges) -> Result<()> {
    if show {
        let settings = config.settings()?;
        println!("Current configuration:");
        println!("  Check interval: {} seconds", settings.check_interval_secs);
        println!("  Force refresh: {} seconds", settings.force_refresh_secs);
        println!("  Show Gregorian: {}", settings.show_gregorian);
        println!("  Locale: {}", settings.locale);
        if let Some(locale) = locale_override() {
            println!("  Locale override ({}): {}", LOCALE_ENV, locale);
        }
        println!("  Icon style: {}", value_name(settings.icon_style));
        println!("  Date format: {}", settings.date_format);
        println!("  Settings file: {}", config.paths().settings_file.display());
        return Ok(());
    }

    if changes.is_empty() {
        println!("No changes made. Use --show to see current configuration.");
        return Ok(());
    }

    let ConfigChanges {
        check_interval,
        force_interval,
        gregorian,
        locale,
        icon_style,
        format,
    } = changes;

    // One update so interval pairs are validated together
    config
        .update_settings(|s| {
            if let Some(secs) = check_interval {
                s.check_interval_secs = secs;
            }
            if let Some(secs) = force_interval {
                s.force_refresh_secs = secs;
            }
            if let Some(show) = gregorian {
                s.show_gregorian = show;
            }
            if let Some(locale) = locale {
                s.locale = locale;
            }
            if let Some(style) = icon_style {
                s.icon_style = style;
            }
            if let Some(format) = format {
                s.date_format = format;
            }
        })
        .inspect_err(|e| {
            if let IndicatorError::InvalidConfiguration(reason) = e {
                eprintln!("Invalid configuration: {reason}");
            }
        })?;

    println!("Configuration saved. Restart the indicator to apply it.");
    Ok(())
}

fn value_name<T: ValueEnum>(value: T) -> String {
    value
        .to_possible_value()
        .map(|v| v.get_name().to_string())
        .unwrap_or_default()
}
