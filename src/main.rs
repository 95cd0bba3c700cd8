// Storefront detail-link harvester
//
// Opens a visible browser on the storefront, waits for a manual login, then
// serves an interactive menu of extraction requests until the user exits.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use dialoguer::{Input, theme::ColorfulTheme};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use storefront_harvest::utils::{
    DEFAULT_ACTIVITY_LOG, DEFAULT_BASE_URL, DEFAULT_FILE_PREFIX, DEFAULT_OUTPUT_DIR,
    DEFAULT_SEEN_LOG,
};
use storefront_harvest::{
    BatchReceipt, ChromiumSession, ExtractionOrchestrator, ExtractionRequest, Genre,
    HarvestConfig, MenuChoice, PageSession, ProgressReporter, parse_genre_choice,
    parse_menu_choice, random_keyword,
};

#[derive(Parser, Debug)]
#[command(name = "storefront-harvest", version, about = "Harvest new detail links from a video storefront")]
struct Args {
    /// Storefront region (e.g. eu, us, uk); prompted for when omitted
    #[arg(long, env = "HARVEST_REGION")]
    region: Option<String>,

    /// Run the browser without a window (manual login is then impossible)
    #[arg(long, env = "HARVEST_HEADLESS")]
    headless: bool,

    /// Persisted log of every URL already reported
    #[arg(long, env = "HARVEST_SEEN_LOG", default_value = DEFAULT_SEEN_LOG)]
    seen_log: PathBuf,

    /// Directory receiving batch files
    #[arg(long, env = "HARVEST_OUTPUT_DIR", default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    #[arg(long, env = "HARVEST_ACTIVITY_LOG", default_value = DEFAULT_ACTIVITY_LOG)]
    activity_log: PathBuf,

    /// Prefix of batch filenames; pass an empty string for none
    #[arg(long, env = "HARVEST_FILE_PREFIX", default_value = DEFAULT_FILE_PREFIX)]
    file_prefix: String,

    #[arg(long, env = "HARVEST_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Upper bound on one scroll-to-stable pass, in seconds
    #[arg(long, env = "HARVEST_SCROLL_MAX_WAIT", default_value_t = 60)]
    scroll_max_wait: u64,

    /// Delay between a scroll and the next height sample, in seconds
    #[arg(long, env = "HARVEST_SCROLL_SAMPLE_DELAY", default_value_t = 2)]
    scroll_sample_delay: u64,

    /// Delay after navigation before scrolling, in seconds
    #[arg(long, env = "HARVEST_SETTLE_DELAY", default_value_t = 3)]
    settle_delay: u64,

    /// Delay after the storefront first opens, in seconds
    #[arg(long, env = "HARVEST_INITIAL_LOAD_DELAY", default_value_t = 5)]
    initial_load_delay: u64,

    /// Deadline on each navigation, in seconds (unbounded when omitted)
    #[arg(long, env = "HARVEST_NAVIGATION_TIMEOUT")]
    navigation_timeout: Option<u64>,

    /// Browser profile directory to reuse between runs
    #[arg(long, env = "HARVEST_CHROME_DATA_DIR")]
    chrome_data_dir: Option<PathBuf>,
}

/// Prints the per-step status lines to the terminal
struct ConsoleProgress;

impl ProgressReporter for ConsoleProgress {
    fn report_navigation_started(&self, url: &str) {
        println!("🌐 Opening {}", style(url).cyan());
    }

    fn report_settling(&self) {}

    fn report_scrolling(&self) {
        println!("📜 Scrolling to load more...");
    }

    fn report_scroll_finished(&self) {
        println!("✅ Reached bottom.");
    }

    fn report_extracted(&self, count: usize) {
        info!("Extracted {count} detail links");
    }

    fn report_batch_saved(&self, receipt: &BatchReceipt, duplicates: usize) {
        println!(
            "💾 Saved {} links to {}",
            receipt.count,
            style(receipt.path.display()).green()
        );
        println!(
            "📊 Found {} new links. 🔁 Skipped {duplicates} duplicates.",
            receipt.count
        );
    }

    fn report_nothing_new(&self, _label: &str) {
        println!("{}", style("⚠️ No new unique links found.").yellow());
    }

    fn report_error(&self, error: &str) {
        println!("{} {error}", style("❌ Extraction failed:").red());
    }
}

/// Read one line from the terminal without blocking the runtime.
async fn prompt(text: &'static str, allow_empty: bool) -> Result<String> {
    tokio::task::spawn_blocking(move || {
        Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt(text)
            .allow_empty(allow_empty)
            .interact_text()
    })
    .await
    .context("Prompt task panicked")?
    .context("Failed to read from terminal")
    .map(|line| line.trim().to_string())
}

fn build_config(args: Args, region: String) -> Result<HarvestConfig> {
    let config = HarvestConfig::builder()
        .seen_log(args.seen_log)
        .output_dir(args.output_dir)
        .activity_log(args.activity_log)
        .file_prefix(args.file_prefix)
        .base_url(args.base_url)
        .region(region)
        .headless(args.headless)
        .scroll_max_wait(Duration::from_secs(args.scroll_max_wait))
        .scroll_sample_delay(Duration::from_secs(args.scroll_sample_delay))
        .settle_delay(Duration::from_secs(args.settle_delay))
        .initial_load_delay(Duration::from_secs(args.initial_load_delay))
        .navigation_timeout_secs(args.navigation_timeout)
        .chrome_data_dir(args.chrome_data_dir)
        .build()?;
    Ok(config)
}

/// Turn a menu choice into a request, prompting for details as needed.
///
/// `Ok(None)` means the choice was abandoned (bad genre number) and the menu
/// should simply be shown again.
async fn request_for(choice: MenuChoice, config: &HarvestConfig) -> Result<Option<ExtractionRequest>> {
    match choice {
        MenuChoice::Storefront => Ok(Some(ExtractionRequest::storefront(config))),
        MenuChoice::Search => {
            let mut keyword = prompt("🔍 Enter search keyword (or leave blank for random)", true).await?;
            if keyword.is_empty() {
                keyword = random_keyword().to_string();
                println!("🎲 Using random keyword: {}", style(&keyword).cyan());
            }
            Ok(Some(ExtractionRequest::search(config, &keyword)?))
        }
        MenuChoice::Genre => {
            println!("🎭 Available genres:");
            for (i, genre) in Genre::ALL.iter().enumerate() {
                println!("{}. {genre}", i + 1);
            }
            let input = prompt("🎯 Choose genre number", true).await?;
            match parse_genre_choice(&input) {
                Ok(genre) => Ok(Some(ExtractionRequest::genre(config, genre))),
                Err(e) => {
                    info!("{e}");
                    println!("{}", style("❌ Invalid genre choice.").red());
                    Ok(None)
                }
            }
        }
        MenuChoice::Exit => Ok(None),
    }
}

fn print_menu() {
    println!();
    println!("{}", style("📋 === MAIN MENU ===").bold());
    for (i, choice) in MenuChoice::ALL.iter().enumerate() {
        println!("{}  {choice}", style(i + 1).bold());
    }
}

async fn run_menu(session: &ChromiumSession, orchestrator: &ExtractionOrchestrator<ConsoleProgress>) -> Result<()> {
    loop {
        print_menu();
        let input = prompt("➡️ Enter your choice", true).await?;

        let Some(choice) = parse_menu_choice(&input) else {
            println!("{}", style("❌ Invalid input. Try again.").red());
            continue;
        };
        if choice == MenuChoice::Exit {
            println!("👋 Exiting. Goodbye!");
            return Ok(());
        }

        let request = match request_for(choice, orchestrator.config()).await {
            Ok(Some(request)) => request,
            Ok(None) => continue,
            Err(e) => {
                println!("{} {e:#}", style("❌").red());
                continue;
            }
        };

        // A failed request is reported by the orchestrator and the menu continues
        if let Err(e) = orchestrator.run(session, &request).await {
            error!(label = %request.label, "Request failed: {e}");
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "storefront_harvest=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut args = Args::parse();

    println!("{}", style("🛠️ Storefront link harvester").bold());
    let region = match args.region.take() {
        Some(region) => region,
        None => prompt("🌍 Enter your storefront region (e.g. eu, us, uk)", false).await?,
    };
    let config = build_config(args, region).context("Invalid configuration")?;

    let session = ChromiumSession::launch(&config)
        .await
        .context("Failed to launch browser")?;

    println!("🌐 Opening storefront...");
    let landing = ExtractionRequest::storefront(&config);
    if let Err(e) = session.navigate(&landing.url).await {
        session.close().await?;
        return Err(e).context("Failed to open the storefront");
    }
    tokio::time::sleep(config.initial_load_delay()).await;

    // Login is manual; the user signals when the session is ready
    prompt("🔐 Log in manually, then press ENTER to continue", true).await?;

    let orchestrator = ExtractionOrchestrator::new(config).with_progress(ConsoleProgress);
    let result = run_menu(&session, &orchestrator).await;

    session.close().await?;
    result
}
