// Main entry point
use clap::Parser;
use colored::Colorize;
use pokedex::application::query::{filter_roster, find_entry};
use pokedex::infrastructure::config::{self, load_config, Logging};
use pokedex::interfaces::browse;
use pokedex::interfaces::cli::Cli;
use pokedex::interfaces::session::{Dispatcher, Event};
use pokedex::presentation::format::{format_detail, format_roster, to_json, SpriteView};
use pokedex::presentation::theme::Theme;
use pokedex::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            eprintln!("Failed to listen for shutdown signal: {}", e);
        } else {
            let _ = shutdown_tx.send(());
        }
    });

    let cli = Cli::parse();
    let config = load_config()?;

    if config.logging.enable {
        init_logging(&config.logging)?;
    }

    if cli.no_color {
        colored::control::set_override(false);
    }

    if cli.generate_config {
        config::generate_config_sample()?;
        return Ok(());
    }

    let theme_name = cli.theme.clone().unwrap_or_else(|| config.theme.clone());
    let theme = Theme::from_name(&theme_name);
    let state = AppState::new(config)?;

    if cli.status {
        print_status(&state);
        return Ok(());
    }

    if cli.query.is_empty() && !cli.list && cli.search.is_none() {
        return browse::run(state, theme, shutdown_rx).await;
    }

    let roster = state.client.get_roster().await?;

    if cli.list || cli.search.is_some() {
        let term = cli.search.as_deref().unwrap_or("");
        let entries = filter_roster(&roster, term);
        if cli.json {
            println!("{}", to_json(&entries)?);
        } else if entries.is_empty() {
            eprintln!("{}", "No Pokémon match that scan.".yellow());
        } else {
            print!("{}", format_roster(&entries, &theme));
        }
        return Ok(());
    }

    let query = cli.query.join(" ");
    let Some(entry) = find_entry(&roster, &query) else {
        eprintln!("{}", format!("No Pokémon matches '{}'", query).red());
        std::process::exit(1);
    };

    // One-shot lookups still go through the background handoff so the
    // sprite failure path matches the interactive loop.
    let (dispatcher, mut events) = Dispatcher::channel(state.clone());
    dispatcher.request_detail(entry.id);
    let loaded = match events.recv().await {
        Some(Event::Detail { result, .. }) => result?,
        _ => anyhow::bail!("detail lookup ended without a result"),
    };

    if cli.json {
        println!("{}", to_json(loaded.detail.as_ref())?);
    } else {
        let sprite = SpriteView::from_bytes(loaded.image.as_ref());
        print!(
            "{}",
            format_detail(&loaded.detail, &sprite, &theme, state.config.enable_emoji)
        );
    }

    if cli.cry {
        if loaded.detail.cry_url.is_none() {
            eprintln!("{}", "No cry is available for this Pokémon.".yellow());
        } else {
            dispatcher.request_cry(&loaded.detail);
            match events.recv().await {
                Some(Event::Cry { result: Ok(path), .. }) => {
                    println!("Cry opened in your system audio app: {}", path.display())
                }
                Some(Event::Cry { result: Err(e), .. }) => eprintln!("{}", e.to_string().red()),
                _ => {}
            }
        }
    }

    Ok(())
}

/// Initialize logging with path and level configuration
fn init_logging(logging: &Logging) -> anyhow::Result<()> {
    use tracing_subscriber::EnvFilter;

    let level = match logging.level.as_str() {
        "DEBUG" => "debug",
        "INFO" => "info",
        "WARN" => "warn",
        "ERROR" => "error",
        _ => "warn",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if let Some(path) = &logging.path {
        if !path.is_empty() {
            // Log to file
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(file)
                .init();
            return Ok(());
        }
    }

    // Log to stderr (default)
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

fn print_status(state: &AppState) {
    println!("{}", "pokedex Status".green().bold());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    println!("API: {}", state.config.api_base());
    println!("Timeout: {}s", state.config.timeout().as_secs());

    let stats = state.client.cache_stats();
    println!(
        "JSON Cache: {}/{} entries",
        stats.json.len, stats.json.capacity
    );
    println!(
        "Detail Cache: {}/{} entries",
        stats.details.len, stats.details.capacity
    );
    println!(
        "Image Cache: {}/{} entries",
        stats.images.len, stats.images.capacity
    );

    println!(
        "Config: {}",
        config::get_config_path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "Not found".to_string())
    );
    println!(
        "Cry directory: {}",
        pokedex::application::cry::session_dir().display()
    );
}
