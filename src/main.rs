use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::{Parser, Subcommand};

use folio::config::FolioConfig;
use folio::core::ambient::{AmbientLayer, MotionPreference};
use folio::core::boundary::Contained;
use folio::core::contact::{ContactField, ContactForm};
use folio::core::content::ContentStore;
use folio::core::header::Breakpoint;
use folio::core::links::{self, DeepLink, SystemOpener};
use folio::core::page::Page;

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Interactive engineering portfolio")]
struct Cli {
    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file (defaults to ./folio.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Load portfolio content from a JSON file instead of the bundled record
    #[arg(long, global = true, value_name = "FILE")]
    content: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Open the portfolio window
    Gui,

    /// Print the portfolio content
    Content {
        /// Emit the full record as JSON
        #[arg(long)]
        json: bool,
    },

    /// Build the contact deep link from form values
    Mailto {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "")]
        company: String,
        #[arg(long)]
        subject: String,
        #[arg(long)]
        message: String,
        /// Hand the link to the system mail client
        #[arg(long)]
        open: bool,
    },

    /// List every outbound link on the page
    Links,

    /// Mount the decorative layer headlessly and describe it
    Ambient {
        /// Viewport width in pixels
        #[arg(long)]
        width: f32,
        #[arg(long)]
        reduced_motion: bool,
        #[arg(long)]
        seed: Option<u64>,
        /// Frames to simulate at 60 fps before reporting
        #[arg(long, default_value_t = 0)]
        frames: u32,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    init_tracing(args.quiet, args.verbose)?;

    let config = FolioConfig::load(args.config.as_deref()).context("Failed to load configuration")?;
    let content = match &args.content {
        Some(path) => ContentStore::from_json_file(path)
            .with_context(|| format!("Failed to load content from {}", path.display()))?,
        None => ContentStore::builtin().clone(),
    };

    match args.command {
        Some(Command::Gui) => run_gui(content, config),
        None if cfg!(feature = "gui") => run_gui(content, config),
        None => print_content(&content, false),
        Some(Command::Content { json }) => print_content(&content, json),
        Some(Command::Mailto {
            name,
            email,
            company,
            subject,
            message,
            open,
        }) => {
            let mut form = ContactForm::default();
            form.set(ContactField::Name, name);
            form.set(ContactField::Email, email);
            form.set(ContactField::Company, company);
            form.set(ContactField::Subject, subject);
            form.set(ContactField::Message, message);
            let link = DeepLink::Mail(form.submit(&content.personal.email)?);
            println!("{}", link.to_uri());
            if open {
                links::follow(&SystemOpener, &link);
            }
            Ok(())
        }
        Some(Command::Links) => print_links(content, config),
        Some(Command::Ambient {
            width,
            reduced_motion,
            seed,
            frames,
        }) => {
            let motion = if reduced_motion {
                MotionPreference::Reduced
            } else {
                config.ambient.motion()
            };
            let seed = seed.unwrap_or_else(|| config.ambient.seed_or_random());
            let breakpoint = Breakpoint::with_limit(width, config.layout.mobile_breakpoint);
            let mut layer = AmbientLayer::mount(breakpoint, motion, config.ambient.graphics, seed);

            let start = Instant::now();
            let dt = Duration::from_secs_f32(1.0 / 60.0);
            for frame in 1..=frames {
                layer.step(dt.as_secs_f32(), start + dt * frame);
            }
            print_ambient(&layer, seed);
            Ok(())
        }
    }
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("FOLIO_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

#[cfg(feature = "gui")]
fn run_gui(content: ContentStore, config: FolioConfig) -> anyhow::Result<()> {
    folio::gui::run(content, config).map_err(|e| anyhow::anyhow!("GUI error: {e}"))
}

#[cfg(not(feature = "gui"))]
fn run_gui(_content: ContentStore, _config: FolioConfig) -> anyhow::Result<()> {
    anyhow::bail!("folio was built without the `gui` feature")
}

fn print_content(content: &ContentStore, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(content)?);
        return Ok(());
    }

    let personal = &content.personal;
    println!("=== {} ===", personal.name);
    println!("{}", personal.title);
    println!("{}\n", personal.location);

    for stat in &content.hero_stats {
        println!("  {:>6}  {}", stat.value, stat.label);
    }

    println!("\nSkills:");
    for category in &content.skills {
        println!("  {}: {}", category.label, category.skills.join(", "));
    }

    println!("\nProjects:");
    for project in &content.projects {
        println!("  [{}] {} ({})", project.id, project.title, project.status);
    }

    println!("\nResearch:");
    for item in &content.research {
        println!("  [{}] {} ({})", item.id, item.title, item.status);
    }

    println!("\nAwards:");
    for award in &content.awards {
        println!("  {} - {}", award.title, award.organization);
    }
    Ok(())
}

fn print_links(content: ContentStore, config: FolioConfig) -> anyhow::Result<()> {
    let page = Page::new(Arc::new(content), config, (1280.0, 800.0));

    println!("Contact:");
    for method in page.content().contact_methods() {
        println!("  {:<10} {}", method.label, method.link);
    }
    println!("  {:<10} {}", "Discuss", page.content().discuss_project_link());
    println!("  {:<10} {}", "Resume", page.content().resume_link());

    for group in page.footer_groups() {
        println!("\n{}:", group.title);
        for link in &group.links {
            println!("  {:<16} {}", link.name, link.link);
        }
    }
    println!("\n{}", page.copyright());
    Ok(())
}

fn print_ambient(layer: &AmbientLayer, seed: u64) {
    println!("viewport:  {:?}", layer.breakpoint());
    println!("motion:    {:?}", layer.motion());
    println!("seed:      {seed}");
    if layer.is_empty() {
        println!("elements:  0 (reduced motion)");
        return;
    }

    let particles = layer.particles().particles();
    let (min, max) = particles
        .iter()
        .fold((f32::MAX, f32::MIN), |(lo, hi), p| (lo.min(p.size), hi.max(p.size)));
    println!("particles: {} (size {min:.2}..{max:.2} px)", particles.len());
    println!("orbs:      {}", layer.orb_frames(1.0, 1.0).count());
    match layer.dice() {
        Some(Contained::Mounted(scene)) => {
            for die in scene.dice() {
                let [x, y, z] = die.position;
                println!(
                    "die {}:   ({x:.2}, {y:.2}, {z:.2}) trail {}",
                    die.protocol(),
                    die.trail().live_count()
                );
            }
        }
        Some(Contained::Fallback(illustration)) => {
            println!("dice:      static illustration ({})", illustration.name);
        }
        None => {}
    }
    println!("elements:  {}", layer.element_count());
}
