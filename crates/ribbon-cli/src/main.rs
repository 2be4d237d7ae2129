use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

use ribbon_core::{
    CarouselController, EntryDraft, RADIUS, THETA, card_visual, export_json, format_short,
    import_json, resting_angle,
};
use ribbon_store::Store;

#[derive(Parser)]
#[command(name = "ribbon", about = "Memory ribbon carousel engine CLI")]
struct Cli {
    /// Override the data directory (default: RIBBON_DATA_DIR or ~/.memory-ribbon)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Enable verbose debug output
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a memory; the view scrolls to its date-sorted position
    Add {
        /// Image URL (or data: URL for an embedded image)
        url: String,

        /// Calendar date, YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<String>,

        /// Free-form note
        #[arg(long, default_value = "")]
        note: String,
    },

    /// List memories in date order with their resting angles
    List,

    /// Edit the memory at a position; omitted fields keep their values
    Edit {
        /// Position in the date-sorted list (from `list`)
        index: usize,

        #[arg(long)]
        url: Option<String>,

        #[arg(long)]
        date: Option<String>,

        #[arg(long)]
        note: Option<String>,
    },

    /// Delete the memory at a position
    Remove {
        /// Position in the date-sorted list (from `list`)
        index: usize,
    },

    /// Show per-card visibility at a given view angle
    View {
        /// Current view angle in degrees
        #[arg(long, default_value_t = 0.0)]
        angle: f64,
    },

    /// Show collection statistics
    Stats,

    /// Export all memories to a JSON file
    Export {
        /// Output file path
        path: PathBuf,
    },

    /// Import memories from a JSON file (replaces the current set)
    Import {
        /// Input file path
        path: PathBuf,
    },
}

fn data_dir(cli: &Cli) -> PathBuf {
    cli.data_dir
        .clone()
        .or_else(|| std::env::var("RIBBON_DATA_DIR").ok().map(PathBuf::from))
        .unwrap_or_else(ribbon_store::default_base_dir)
}

fn open_store(cli: &Cli) -> Result<Store> {
    let dir = data_dir(cli);
    fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create data dir {}", dir.display()))?;
    Store::open(&dir.join("ribbon.db")).context("failed to open entry store")
}

fn open_carousel(cli: &Cli) -> Result<CarouselController<Store>> {
    let store = open_store(cli)?;
    CarouselController::new(store).context("failed to load entries")
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Commands::Add { url, date, note } => cmd_add(&cli, url, date.as_deref(), note),
        Commands::List => cmd_list(&cli),
        Commands::Edit {
            index,
            url,
            date,
            note,
        } => cmd_edit(&cli, *index, url.clone(), date.clone(), note.clone()),
        Commands::Remove { index } => cmd_remove(&cli, *index),
        Commands::View { angle } => cmd_view(&cli, *angle),
        Commands::Stats => cmd_stats(&cli),
        Commands::Export { path } => cmd_export(&cli, path),
        Commands::Import { path } => cmd_import(&cli, path),
    }
}

fn cmd_add(cli: &Cli, url: &str, date: Option<&str>, note: &str) -> Result<()> {
    let mut carousel = open_carousel(cli)?;

    let default_date = carousel.begin_add().date_field.clone();
    let draft = EntryDraft {
        url: Some(url.to_string()),
        date: date.map(str::to_string).unwrap_or(default_date),
        note: note.to_string(),
    };

    let receipt = carousel.save_edit(draft)?;
    if let Some(e) = receipt.storage {
        bail!("memory not persisted: {e}");
    }

    println!(
        "added at position {} of {} (scrolled to {:.0}\u{b0})",
        receipt.index + 1,
        carousel.entries().len(),
        receipt.target_angle,
    );
    Ok(())
}

fn cmd_list(cli: &Cli) -> Result<()> {
    let carousel = open_carousel(cli)?;
    if carousel.is_empty() {
        println!("(no memories)");
        return Ok(());
    }

    for (i, entry) in carousel.entries().iter().enumerate() {
        let image = if entry.has_embedded_image() {
            "(embedded image)"
        } else {
            entry.url.as_str()
        };
        println!(
            "[{i}] {:<13} {:.0}\u{b0}  {}  {}",
            format_short(&entry.date),
            resting_angle(i),
            image,
            entry.note,
        );
    }
    Ok(())
}

fn cmd_edit(
    cli: &Cli,
    index: usize,
    url: Option<String>,
    date: Option<String>,
    note: Option<String>,
) -> Result<()> {
    let mut carousel = open_carousel(cli)?;
    check_index(index, carousel.entries().len())?;

    let session = carousel.begin_edit(index).clone();
    let draft = EntryDraft {
        url,
        date: date.unwrap_or(session.date_field),
        note: note.unwrap_or(session.note_field),
    };

    let receipt = carousel.save_edit(draft)?;
    if let Some(e) = receipt.storage {
        bail!("edit not persisted: {e}");
    }

    println!(
        "saved; now at position {} of {} (scrolled to {:.0}\u{b0})",
        receipt.index + 1,
        carousel.entries().len(),
        receipt.target_angle,
    );
    Ok(())
}

fn cmd_remove(cli: &Cli, index: usize) -> Result<()> {
    let mut carousel = open_carousel(cli)?;
    check_index(index, carousel.entries().len())?;

    let receipt = carousel.delete_at(index);
    if let Some(e) = receipt.storage {
        bail!("deletion not persisted: {e}");
    }

    println!(
        "removed; {} remain (target angle {:.0}\u{b0})",
        receipt.remaining, receipt.target_angle,
    );
    Ok(())
}

fn cmd_view(cli: &Cli, angle: f64) -> Result<()> {
    let carousel = open_carousel(cli)?;
    println!(
        "view angle {angle:.0}\u{b0} (spacing {THETA:.0}\u{b0}, radius {RADIUS:.0})",
    );
    if carousel.is_empty() {
        println!("(no memories)");
        return Ok(());
    }

    for (i, entry) in carousel.entries().iter().enumerate() {
        let visual = card_visual(i, angle);
        println!(
            "[{i}] resting {:>4.0}\u{b0}  opacity {:.2}  {}  {}",
            resting_angle(i),
            visual.opacity,
            if visual.interactive { "interactive" } else { "inert      " },
            format_short(&entry.date),
        );
    }
    Ok(())
}

fn cmd_stats(cli: &Cli) -> Result<()> {
    let carousel = open_carousel(cli)?;
    let store = carousel.store();

    println!("entries:  {}", carousel.entries().len());
    println!(
        "db_size:  {:.1}KB",
        store.db_size().context("failed to read db size")? as f64 / 1024.0
    );

    if let (Some(first), Some(last)) = (carousel.entries().first(), carousel.entries().last()) {
        println!(
            "range:    {} to {}",
            format_short(&first.date),
            format_short(&last.date)
        );
    }
    Ok(())
}

fn cmd_export(cli: &Cli, path: &Path) -> Result<()> {
    let carousel = open_carousel(cli)?;
    let json = export_json(carousel.entries()).context("failed to serialize entries")?;
    fs::write(path, &json).with_context(|| format!("failed to write {}", path.display()))?;

    println!("exported {} entries to {}", carousel.entries().len(), path.display());
    Ok(())
}

fn cmd_import(cli: &Cli, path: &Path) -> Result<()> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let entries = import_json(&json).context("failed to parse import JSON")?;

    // Sort before persisting so the stored snapshot upholds the ordering
    // invariant that every load path assumes.
    let collection = ribbon_core::OrderedCollection::from_entries(entries);

    let store = open_store(cli)?;
    store
        .save_entries(collection.as_slice())
        .context("failed to persist imported entries")?;

    println!("imported {} entries from {}", collection.len(), path.display());
    Ok(())
}

fn check_index(index: usize, len: usize) -> Result<()> {
    if index >= len {
        bail!("index {index} out of range ({len} entries)");
    }
    Ok(())
}
