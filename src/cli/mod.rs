//! Command-line interface for nyxo.
//!
//! Provides commands for extracting excerpts, running the catalog build,
//! browsing content, and managing the signed-in user's bookmarks and
//! comments.

use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use crate::api::UserContentSource;
use crate::bookmarks::{reconcile_bookmarks, Bookmark, BookmarkSet};
use crate::build::NodeProcessor;
use crate::config::{self, ResolvedConfig};
use crate::content::{group_by_section, Catalog, ContentKind, ContentNode, Locale};
use crate::richtext::extract_excerpt_from_json;

pub mod comments;

/// nyxo - content core for the sleep-coaching site
#[derive(Parser, Debug)]
#[command(name = "nyxo")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the plain-text excerpt of a rich-text JSON document
    Excerpt {
        /// Document file (reads from stdin if not provided)
        input: Option<PathBuf>,

        /// Excerpt length in characters (defaults to configured length)
        #[arg(short, long)]
        length: Option<usize>,
    },

    /// Attach excerpts and reading times to every node of the catalog
    Build {
        /// Catalog export to process (defaults to configured catalog)
        #[arg(short, long)]
        catalog: Option<PathBuf>,

        /// Write the result here instead of updating the catalog in place
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List content in the catalog
    Catalog {
        /// Filter by content type
        #[arg(short, long, value_enum)]
        kind: Option<KindArg>,

        /// Locale (en-US, fi-FI, or a language code)
        #[arg(long)]
        locale: Option<String>,

        /// Only show nodes matching this query
        #[arg(short, long)]
        search: Option<String>,

        /// Maximum number of items to show
        #[arg(long, default_value = "50")]
        limit: usize,
    },

    /// List the coaching weeks for a site language
    Weeks {
        /// Site language code (en, fi)
        #[arg(short, long)]
        language: Option<String>,
    },

    /// Show a week with its lessons grouped by section
    Week {
        /// Week slug
        slug: String,

        #[arg(long)]
        locale: Option<String>,
    },

    /// Show the signed-in user's bookmarked content
    Bookmarks {
        #[arg(long)]
        locale: Option<String>,
    },

    /// Bookmark a piece of content (or remove the bookmark)
    Bookmark {
        /// Content type
        #[arg(value_enum)]
        kind: KindArg,

        /// Content slug
        slug: String,

        /// Remove the bookmark instead of adding it
        #[arg(long)]
        remove: bool,
    },

    /// Read and write comments
    Comments {
        #[command(subcommand)]
        command: comments::CommentCommands,
    },

    /// Show resolved configuration (debug)
    Config,
}

/// Content type for CLI (maps to ContentKind)
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum KindArg {
    Week,
    Lesson,
    Habit,
}

impl From<KindArg> for ContentKind {
    fn from(k: KindArg) -> Self {
        match k {
            KindArg::Week => ContentKind::Week,
            KindArg::Lesson => ContentKind::Lesson,
            KindArg::Habit => ContentKind::Habit,
        }
    }
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        let cfg = config::load()?;

        match self.command {
            Commands::Excerpt { input, length } => {
                print_excerpt(&cfg, input, length)
            }
            Commands::Build { catalog, output } => {
                build_catalog(&cfg, catalog, output).await
            }
            Commands::Catalog {
                kind,
                locale,
                search,
                limit,
            } => {
                list_catalog(&cfg, kind, locale, search, limit).await
            }
            Commands::Weeks { language } => {
                list_weeks(&cfg, language).await
            }
            Commands::Week { slug, locale } => {
                show_week(&cfg, &slug, locale).await
            }
            Commands::Bookmarks { locale } => {
                show_bookmarks(&cfg, locale).await
            }
            Commands::Bookmark { kind, slug, remove } => {
                toggle_bookmark(&cfg, kind.into(), slug, remove).await
            }
            Commands::Comments { command } => {
                comments::execute(&cfg, command).await
            }
            Commands::Config => {
                show_config(&cfg)
            }
        }
    }
}

fn resolve_locale(cfg: &ResolvedConfig, locale: Option<String>) -> Result<Locale> {
    match locale {
        Some(code) => code.parse(),
        None => Ok(cfg.default_locale),
    }
}

/// Print an excerpt from a document file or stdin
fn print_excerpt(cfg: &ResolvedConfig, input: Option<PathBuf>, length: Option<usize>) -> Result<()> {
    let raw = if let Some(path) = input {
        std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read document: {}", path.display()))?
    } else {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read from stdin")?;
        buffer
    };

    let excerpt = extract_excerpt_from_json(&raw, length.unwrap_or(cfg.excerpt_length))
        .context("Failed to extract excerpt")?;
    println!("{}", excerpt);

    Ok(())
}

/// Catalog the build reads: an explicit path must exist, the configured one may not yet
fn build_input(cfg: &ResolvedConfig, catalog_path: Option<PathBuf>) -> Result<PathBuf> {
    match catalog_path {
        Some(path) if !path.exists() => {
            anyhow::bail!("Catalog not found: {}", path.display())
        }
        Some(path) => Ok(path),
        None => Ok(cfg.catalog.clone()),
    }
}

/// Run the build step over a catalog export
async fn build_catalog(
    cfg: &ResolvedConfig,
    catalog_path: Option<PathBuf>,
    output: Option<PathBuf>,
) -> Result<()> {
    let input = build_input(cfg, catalog_path)?;
    let mut catalog = Catalog::load(&input).await?;

    if catalog.is_empty() {
        println!("Catalog is empty: {}", input.display());
        return Ok(());
    }

    let report = NodeProcessor::new(cfg.excerpt_length)
        .with_words_per_minute(cfg.words_per_minute)
        .process_catalog(&mut catalog);

    let target = output.unwrap_or(input);
    catalog.save(&target).await?;

    eprintln!("Processed: {}", report.processed);
    eprintln!("Unchanged: {}", report.unchanged);
    eprintln!("Skipped:   {}", report.skipped);
    if !report.is_success() {
        eprintln!("Failed:    {}", report.failures.len());
        for failure in &report.failures {
            eprintln!("  {} ({}): {}", failure.slug, failure.id, failure.error);
        }
    }
    eprintln!("Written to {}", target.display());

    Ok(())
}

fn truncate_title(title: &str, width: usize) -> String {
    if title.chars().count() > width {
        let cut: String = title.chars().take(width - 3).collect();
        format!("{}...", cut)
    } else {
        title.to_string()
    }
}

fn print_nodes(nodes: &[&ContentNode], limit: usize) {
    println!("{:<8} {:<32} {:<40}", "TYPE", "SLUG", "TITLE");
    println!("{}", "-".repeat(80));

    for node in nodes.iter().take(limit) {
        println!(
            "{:<8} {:<32} {:<40}",
            node.kind.to_string(),
            truncate_title(&node.slug, 32),
            truncate_title(&node.title, 40)
        );
    }
}

/// List catalog content
async fn list_catalog(
    cfg: &ResolvedConfig,
    kind: Option<KindArg>,
    locale: Option<String>,
    search: Option<String>,
    limit: usize,
) -> Result<()> {
    let locale = resolve_locale(cfg, locale)?;
    let catalog = Catalog::load(&cfg.catalog).await?;

    if catalog.is_empty() {
        println!("Catalog is empty. Export content to {} first.", cfg.catalog.display());
        return Ok(());
    }

    let mut nodes = match search {
        Some(query) => catalog.search(&query, locale),
        None => catalog.for_locale(locale),
    };
    if let Some(kind) = kind {
        let kind = ContentKind::from(kind);
        nodes.retain(|n| n.kind == kind);
    }

    if nodes.is_empty() {
        println!("No content found for {}", locale);
        return Ok(());
    }

    print_nodes(&nodes, limit);
    println!("\nTotal: {} items", nodes.len());

    Ok(())
}

/// List the coaching weeks
async fn list_weeks(cfg: &ResolvedConfig, language: Option<String>) -> Result<()> {
    let locale = language
        .map(|l| Locale::from_language(&l))
        .unwrap_or(cfg.default_locale);
    let catalog = Catalog::load(&cfg.catalog).await?;

    let weeks = catalog.coaching_weeks(locale);
    if weeks.is_empty() {
        println!("No coaching weeks for language '{}'", locale.language());
        return Ok(());
    }

    for week in weeks {
        println!("{} ({})", week.title, week.path());
        if let Some(excerpt) = week.excerpt() {
            println!("  {}", excerpt);
        }
    }

    Ok(())
}

/// Show a week and its lessons
async fn show_week(cfg: &ResolvedConfig, slug: &str, locale: Option<String>) -> Result<()> {
    let locale = resolve_locale(cfg, locale)?;
    let catalog = Catalog::load(&cfg.catalog).await?;

    let week = catalog
        .find_by_slug(ContentKind::Week, slug, locale)
        .ok_or_else(|| anyhow::anyhow!("Week not found: {} ({})", slug, locale))?;

    println!("{}", week.title);
    if let Some(excerpt) = week.excerpt() {
        println!("{}", excerpt);
    }

    for section in group_by_section(catalog.lessons_for_week(slug, locale)) {
        let header = section.header.map(|h| h.title.as_str()).unwrap_or("Lessons");
        println!("\n== {} ==", header);
        for lesson in section.lessons {
            let minutes = lesson
                .fields
                .reading_time
                .map(|rt| format!(" [{} min]", rt.minutes))
                .unwrap_or_default();
            println!("  {}{} ({})", lesson.title, minutes, lesson.path());
        }
    }

    Ok(())
}

/// Fetch bookmarks and show the bookmarked content per type
async fn show_bookmarks(cfg: &ResolvedConfig, locale: Option<String>) -> Result<()> {
    let locale = resolve_locale(cfg, locale)?;
    let catalog = Catalog::load(&cfg.catalog).await?;
    let client = cfg.api_client()?;

    let bookmarks = client
        .list_bookmarks()
        .await
        .context("Failed to fetch bookmarks")?;

    render_bookmarks(&catalog, locale, &bookmarks);
    Ok(())
}

fn render_bookmarks(catalog: &Catalog, locale: Locale, bookmarks: &BookmarkSet) {
    let result = reconcile_bookmarks(catalog.for_locale(locale), bookmarks);

    if result.is_empty() {
        println!("No bookmarked content");
    }

    for kind in ContentKind::ALL {
        let nodes = result.of_kind(kind);
        if nodes.is_empty() {
            continue;
        }
        println!("\n== {}s ==", kind);
        for node in nodes {
            println!("  {} ({})", node.title, node.path());
            if let Some(excerpt) = node.excerpt() {
                println!("    {}", excerpt);
            }
        }
    }

    let missing = missing_bookmarks(catalog, locale, bookmarks);
    if !missing.is_empty() {
        println!("\nNot in the {} catalog:", locale);
        for bookmark in missing {
            println!("  {} {}", bookmark.content_type, bookmark.slug);
        }
    }
}

/// Bookmarks with no matching node in the catalog, sorted by type then slug
fn missing_bookmarks(catalog: &Catalog, locale: Locale, bookmarks: &BookmarkSet) -> Vec<Bookmark> {
    bookmarks
        .to_vec()
        .into_iter()
        .filter(|b| catalog.find_by_slug(b.content_type, &b.slug, locale).is_none())
        .collect()
}

/// Add or remove a bookmark
async fn toggle_bookmark(
    cfg: &ResolvedConfig,
    kind: ContentKind,
    slug: String,
    remove: bool,
) -> Result<()> {
    let client = cfg.api_client()?;
    let bookmark = Bookmark::new(kind, slug);

    if remove {
        client
            .remove_bookmark(&bookmark)
            .await
            .context("Failed to remove bookmark")?;
        eprintln!("Removed bookmark: {} {}", bookmark.content_type, bookmark.slug);
    } else {
        client
            .add_bookmark(&bookmark)
            .await
            .context("Failed to add bookmark")?;
        eprintln!("Bookmarked: {} {}", bookmark.content_type, bookmark.slug);
    }

    Ok(())
}

/// Show the resolved configuration (for debugging)
fn show_config(cfg: &ResolvedConfig) -> Result<()> {
    println!(
        "Config file: {}",
        cfg.config_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none - using defaults)".to_string())
    );
    println!();
    println!("Content:");
    println!("  Catalog:        {}", cfg.catalog.display());
    println!("  Excerpt length: {}", cfg.excerpt_length);
    println!("  Reading speed:  {} wpm", cfg.words_per_minute);
    println!(
        "  Default locale: {} (language '{}')",
        cfg.default_locale,
        cfg.default_locale.language()
    );
    println!();
    println!("API:");
    println!("  URL:     {}", cfg.api.url.as_deref().unwrap_or("(not set)"));
    println!("  Timeout: {}s", cfg.api.timeout_seconds);
    println!(
        "  Session: {}",
        if cfg.session().is_some() { "token set" } else { "anonymous" }
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_cli_parses_bookmark_command() {
        let cli = Cli::try_parse_from(["nyxo", "bookmark", "lesson", "sleep-101", "--remove"]).unwrap();
        match cli.command {
            Commands::Bookmark { kind, slug, remove } => {
                assert_eq!(ContentKind::from(kind), ContentKind::Lesson);
                assert_eq!(slug, "sleep-101");
                assert!(remove);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_parses_excerpt_length() {
        let cli = Cli::try_parse_from(["nyxo", "excerpt", "doc.json", "--length", "80"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Excerpt { length: Some(80), .. }
        ));
    }

    fn config_with_catalog(catalog: PathBuf) -> ResolvedConfig {
        ResolvedConfig {
            catalog,
            excerpt_length: 140,
            words_per_minute: 200,
            default_locale: Locale::EnUs,
            api: config::ApiSettings::default(),
            config_file: None,
        }
    }

    #[test]
    fn test_build_input_rejects_missing_explicit_catalog() {
        let temp = TempDir::new().unwrap();
        let cfg = config_with_catalog(temp.path().join("catalog.json"));

        let err = build_input(&cfg, Some(temp.path().join("typo.json"))).unwrap_err();
        assert!(err.to_string().contains("Catalog not found"));

        // The configured catalog may not exist yet
        assert_eq!(build_input(&cfg, None).unwrap(), temp.path().join("catalog.json"));

        let existing = temp.path().join("export.json");
        std::fs::write(&existing, r#"{"version":1,"nodes":[]}"#).unwrap();
        assert_eq!(build_input(&cfg, Some(existing.clone())).unwrap(), existing);
    }

    #[tokio::test]
    async fn test_build_catalog_fails_for_missing_explicit_catalog() {
        let temp = TempDir::new().unwrap();
        let cfg = config_with_catalog(temp.path().join("catalog.json"));

        let result = build_catalog(&cfg, Some(temp.path().join("typo.json")), None).await;
        assert!(result.is_err());
        assert!(!temp.path().join("typo.json").exists());
    }

    #[test]
    fn test_missing_bookmarks() {
        let mut catalog = Catalog::new();
        catalog.add(ContentNode::new("l1", "caffeine", ContentKind::Lesson, Locale::EnUs, "Caffeine"));

        let bookmarks: BookmarkSet = [
            Bookmark::new(ContentKind::Lesson, "caffeine"),
            Bookmark::new(ContentKind::Week, "caffeine"),
            Bookmark::new(ContentKind::Habit, "walk"),
        ]
        .into_iter()
        .collect();

        let missing = missing_bookmarks(&catalog, Locale::EnUs, &bookmarks);
        assert_eq!(
            missing,
            vec![
                Bookmark::new(ContentKind::Week, "caffeine"),
                Bookmark::new(ContentKind::Habit, "walk"),
            ]
        );
    }

    #[test]
    fn test_truncate_title() {
        assert_eq!(truncate_title("Short", 10), "Short");
        assert_eq!(truncate_title("Circadian rhythm basics", 10), "Circadi...");
    }
}
