mod cli;

use anyhow::{bail, Result};
use clap::Parser;

use treebites::catalog::map::{self, MapView, ATTRIBUTION};
use treebites::catalog::{filter_events, results_label, sample_events, EventQuery, FoodEvent, EMPTY_MESSAGE};
use treebites::config::Config;
use treebites::form::{HttpEndpoint, JoinForm, Notification, Notifier, Variant};

use cli::{Cli, Commands};

/// Prints notifications as they would appear in a toast.
struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, n: Notification) {
        match n.variant {
            Variant::Default => println!("{}\n{}", n.title, n.description),
            Variant::Destructive => eprintln!("{}\n{}", n.title, n.description),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(&cli.config)?;
    if let Err(e) = treebites::logging::init(&config.logging) {
        eprintln!("logging disabled: {}", e);
    }
    tracing::debug!(path = %cli.config.display(), "configuration loaded");

    match cli.command.unwrap_or(Commands::Field { count: None }) {
        Commands::Field { count } => {
            if let Some(count) = count {
                config.field.count = count;
            }
            treebites::window::run(config)
                .map_err(|e| anyhow::anyhow!("particle field window failed: {}", e))?;
        }
        Commands::Events {
            search,
            category,
            json,
        } => {
            let query = EventQuery::new(search, category);
            let found = filter_events(sample_events(), &query);
            if json {
                println!("{}", serde_json::to_string_pretty(&found)?);
            } else {
                print_events(&found);
            }
        }
        Commands::Map {
            zoom,
            static_layout,
            json,
        } => {
            let events: Vec<&FoodEvent> = sample_events().iter().collect();
            if static_layout {
                let placed = map::static_positions(&events);
                if json {
                    println!("{}", serde_json::to_string_pretty(&placed)?);
                } else {
                    for m in &placed {
                        println!("{:>3}  x {:5.1}%  y {:5.1}%", m.id, m.x_percent, m.y_percent);
                    }
                }
            } else {
                let view = MapView::default().with_zoom(zoom);
                let placed = map::place_markers(&view, &events);
                if json {
                    println!("{}", serde_json::to_string_pretty(&placed)?);
                } else {
                    for tile in view.visible_tiles() {
                        println!("{}", tile.url());
                    }
                    println!();
                    for m in &placed {
                        println!("{:>3}  {:<24} left {:7.1}  top {:7.1}", m.id, m.title, m.left, m.top);
                    }
                    println!("\n{}", ATTRIBUTION);
                }
            }
        }
        Commands::Join {
            club,
            contact,
            email,
            social,
            events,
            message,
            catered,
        } => {
            if !config.form.is_configured() {
                bail!("no form endpoint configured; set [form] endpoint in {}", cli.config.display());
            }
            let endpoint = HttpEndpoint::new(config.form.endpoint.clone(), config.form.timeout());
            let mut form = JoinForm::new(club, contact, email);
            form.social_media = social;
            form.events_per_quarter = events;
            form.message = message;
            form.hosts_catered_events = catered;
            form.submit(&endpoint, &ConsoleNotifier)?;
        }
        Commands::Config => {
            print!("{}", config.to_toml());
        }
    }

    Ok(())
}

fn print_events(events: &[&FoodEvent]) {
    if events.is_empty() {
        println!("{}", EMPTY_MESSAGE);
        return;
    }
    println!("{}\n", results_label(events.len()));
    for e in events {
        match &e.category {
            Some(category) => println!("{}  [{}]", e.title, category),
            None => println!("{}", e.title),
        }
        if let Some(organizer) = &e.organizer {
            println!("  Hosted by {}", organizer);
        }
        println!("  {}", e.description);
        println!("  {}", e.time);
        if let Some(notes) = &e.location_notes {
            println!("  {}", notes);
        }
        println!();
    }
}
