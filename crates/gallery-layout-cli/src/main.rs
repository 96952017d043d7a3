use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use gallery_layout_core::model::Partition;
use gallery_layout_core::{GalleryLayout, ImageBox, LayoutConfig, RowPacker, layout_partition};
use handlebars::Handlebars;
use serde::{Deserialize, Serialize};
use tracing::info;

mod input;

use input::collect_images;

#[derive(Parser, Debug)]
#[command(
    name = "gallery-layout",
    about = "Lay out images into justified gallery rows",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Show progress bars (disable with --progress false or --quiet)
    #[arg(long, default_value_t = true, action=ArgAction::Set, global=true, help_heading = "Logging/UX")]
    progress: bool,
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action=ArgAction::Count, global=true, help_heading = "Logging/UX")]
    verbose: u8,
    /// Quiet mode (overrides verbose)
    #[arg(
        short,
        long,
        default_value_t = false,
        global = true,
        help_heading = "Logging/UX"
    )]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute row placements and export JSON metadata
    Layout(LayoutArgs),
    /// Render a static HTML gallery page
    Html(LayoutArgs),
    /// Simple timing bench (packs once, prints time + cost)
    Bench(BenchArgs),
}

#[derive(Parser, Debug, Clone)]
struct LayoutArgs {
    // Input/Output
    /// Input image, directory, or JSON manifest (`[{key, width, height}]`)
    #[arg(help_heading = "Input/Output")]
    input: PathBuf,
    /// Output directory
    #[arg(short, long, default_value = "out", help_heading = "Input/Output")]
    out_dir: PathBuf,
    /// Output base name (files will be name.json/.html/.dot)
    #[arg(short, long, default_value = "gallery", help_heading = "Input/Output")]
    name: String,
    /// YAML config file path (overrides layout options)
    #[arg(long, help_heading = "Input/Output")]
    config: Option<PathBuf>,
    /// Include patterns (glob). If set, only files matching any pattern are considered
    #[arg(long, help_heading = "Input/Output")]
    include: Vec<String>,
    /// Exclude patterns (glob). Files matching any pattern will be ignored
    #[arg(long, help_heading = "Input/Output")]
    exclude: Vec<String>,

    // Layout
    /// Container width rows are justified to
    #[arg(long, default_value_t = gallery_layout_core::DEFAULT_VIEWPORT_WIDTH, help_heading = "Layout")]
    viewport_width: f64,
    /// Target row height
    #[arg(long, default_value_t = gallery_layout_core::DEFAULT_IDEAL_HEIGHT, help_heading = "Layout")]
    ideal_height: f64,
    /// Pixels between items and between rows
    #[arg(long, default_value_t = gallery_layout_core::DEFAULT_GAP, help_heading = "Layout")]
    gap: f64,

    // Export
    /// Metadata format: json-array | json (alias) | json-hash
    #[arg(long, default_value = "json-array", help_heading = "Export")]
    metadata: String,
    /// External handlebars template used by `html`
    #[arg(long, help_heading = "Export")]
    template: Option<PathBuf>,
    /// Write the boundary graph (Graphviz DOT, chosen rows in red) to this file
    #[arg(long, help_heading = "Export")]
    dot: Option<PathBuf>,
    /// Export layout stats (JSON) to this file
    #[arg(long, help_heading = "Export")]
    export_stats: Option<PathBuf>,
    /// Print the merged configuration (after CLI/YAML) and exit
    #[arg(long, default_value_t = false, help_heading = "Export")]
    print_config: bool,
    /// Output format for --print-config: json|yaml
    #[arg(long, default_value = "json", value_parser = ["json", "yaml"], help_heading = "Export")]
    print_config_format: String,
    /// Dry run: compute layout and stats but do not write files
    #[arg(long, default_value_t = false, help_heading = "Export")]
    dry_run: bool,
}

#[derive(Parser, Debug, Clone)]
struct BenchArgs {
    /// Input image, directory, or JSON manifest
    input: PathBuf,
    /// Container width rows are justified to
    #[arg(long, default_value_t = gallery_layout_core::DEFAULT_VIEWPORT_WIDTH)]
    viewport_width: f64,
    /// Target row height
    #[arg(long, default_value_t = gallery_layout_core::DEFAULT_IDEAL_HEIGHT)]
    ideal_height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Output {
    Json,
    Html,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing_with_level(cli.quiet, cli.verbose);
    let show_progress = cli.progress && !cli.quiet;
    match &cli.command {
        Commands::Layout(args) => run_layout(args, Output::Json, show_progress),
        Commands::Html(args) => run_layout(args, Output::Html, show_progress),
        Commands::Bench(b) => run_bench(b),
    }
}

fn run_layout(cli: &LayoutArgs, output: Output, show_progress: bool) -> anyhow::Result<()> {
    let base = LayoutConfig {
        viewport_width: cli.viewport_width,
        ideal_height: cli.ideal_height,
        gap: cli.gap,
    };
    let cfg = if let Some(path) = &cli.config {
        let file = fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let y: YamlConfig = serde_yaml::from_str(&file)
            .with_context(|| format!("parse config {}", path.display()))?;
        y.into_layout_config(base)
    } else {
        base
    };
    cfg.validate()?;

    if cli.print_config {
        match cli.print_config_format.as_str() {
            "yaml" => println!("{}", serde_yaml::to_string(&cfg)?),
            _ => println!("{}", serde_json::to_string_pretty(&cfg)?),
        }
        return Ok(());
    }

    let images = collect_images(&cli.input, &cli.include, &cli.exclude, show_progress)?;
    if images.is_empty() {
        anyhow::bail!("no usable images found in {}", cli.input.display());
    }
    info!(count = images.len(), "collected images");

    let packer = RowPacker::new(cfg.clone());
    let mut dot: Option<String> = None;
    let partition: Partition<'_, ImageBox> = if cli.dot.is_some() {
        let mut sink = |graph: &str| dot = Some(graph.to_string());
        packer.pack_traced(&images, &mut sink)?
    } else {
        packer.pack(&images)?
    };
    let layout = layout_partition(&partition, &cfg)?;
    let stats = layout.stats();
    info!(
        rows = stats.num_rows,
        height = format!("{:.1}", stats.container_height),
        max_deviation = format!("{:.1}px", stats.max_deviation),
        "stats"
    );

    if !cli.dry_run {
        fs::create_dir_all(&cli.out_dir)
            .with_context(|| format!("create out_dir {}", cli.out_dir.display()))?;
    }

    let keys: Vec<&str> = images.iter().map(|img| img.key.as_str()).collect();
    match output {
        Output::Json => {
            let json_value = match cli.metadata.as_str() {
                // "json" is an alias of "json-array"
                "json-array" | "json" => gallery_layout_core::to_json_array(&layout, &keys),
                "json-hash" => gallery_layout_core::to_json_hash(&layout, &keys),
                other => anyhow::bail!("unknown metadata format: {}", other),
            };
            if !cli.dry_run {
                let json_path = cli.out_dir.join(format!("{}.json", cli.name));
                let json = serde_json::to_string_pretty(&json_value)?;
                fs::write(&json_path, json)
                    .with_context(|| format!("write {}", json_path.display()))?;
                info!(?json_path, rows = layout.rows.len(), "layout written");
            }
        }
        Output::Html => {
            let tpl_owned_from_file: Option<String> = if let Some(path) = &cli.template {
                Some(
                    fs::read_to_string(path)
                        .with_context(|| format!("read template {}", path.display()))?,
                )
            } else {
                None
            };
            let tpl_ref: &str = match &tpl_owned_from_file {
                Some(s) => s.as_str(),
                None => include_str!("templates/gallery.hbs"),
            };
            let ctx = build_template_context(&layout, &keys, &cli.name);

            let mut reg = Handlebars::new();
            reg.set_strict_mode(true);
            reg.register_template_string("tpl", tpl_ref)?;
            let rendered = reg.render("tpl", &ctx)?;

            if !cli.dry_run {
                let html_path = cli.out_dir.join(format!("{}.html", cli.name));
                fs::write(&html_path, rendered)
                    .with_context(|| format!("write {}", html_path.display()))?;
                info!(?html_path, items = layout.placements.len(), "page written");
            }
        }
    }

    if let (Some(dot_path), Some(dot)) = (&cli.dot, &dot) {
        if !cli.dry_run {
            fs::write(dot_path, dot).with_context(|| format!("write {}", dot_path.display()))?;
            info!(?dot_path, "graph written");
        } else {
            println!("{}", dot);
        }
    }

    if let Some(stats_path) = &cli.export_stats {
        if !cli.dry_run {
            fs::write(stats_path, serde_json::to_string_pretty(&stats)?)
                .with_context(|| format!("write {}", stats_path.display()))?;
            info!(?stats_path, "stats exported");
        } else {
            println!("{}", stats.summary());
        }
    }
    Ok(())
}

fn run_bench(b: &BenchArgs) -> anyhow::Result<()> {
    use std::time::Instant;
    let images = collect_images(&b.input, &[], &[], false)?;
    let cfg = LayoutConfig {
        viewport_width: b.viewport_width,
        ideal_height: b.ideal_height,
        ..Default::default()
    };
    let packer = RowPacker::new(cfg);
    let start = Instant::now();
    let partition = packer.pack(&images)?;
    let dur = start.elapsed();
    println!(
        "items={} rows={} cost={:.1} time={}",
        images.len(),
        partition.len(),
        partition.total_cost(),
        bench_fmt_dur(dur)
    );
    Ok(())
}

fn bench_fmt_dur(d: Duration) -> String {
    let ms = d.as_secs_f64() * 1000.0;
    if ms >= 1.0 {
        format!("{:.1}ms", ms)
    } else {
        format!("{}us", d.as_micros())
    }
}

fn init_tracing_with_level(quiet: bool, verbose: u8) {
    let level = if quiet {
        "error".to_string()
    } else {
        match verbose {
            0 => "info".into(),
            1 => "debug".into(),
            _ => "trace".into(),
        }
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(level)
        .with_target(false)
        .try_init();
}

#[derive(Serialize)]
struct TemplateItem {
    index: usize,
    src: String,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    transform: String,
}

#[derive(Serialize)]
struct TemplateContext {
    title: String,
    width: f64,
    height: f64,
    gap: f64,
    items: Vec<TemplateItem>,
}

fn build_template_context(layout: &GalleryLayout, keys: &[&str], title: &str) -> TemplateContext {
    let items = layout
        .placements
        .iter()
        .map(|p| TemplateItem {
            index: p.index,
            src: keys.get(p.index).copied().unwrap_or_default().to_string(),
            x: p.x,
            y: p.y,
            width: p.width,
            height: p.height,
            transform: p.css_transform(),
        })
        .collect();
    TemplateContext {
        title: title.to_string(),
        width: layout.width,
        height: layout.height,
        gap: layout.gap,
        items,
    }
}

#[derive(Debug, Deserialize, Default)]
struct YamlConfig {
    viewport_width: Option<f64>,
    ideal_height: Option<f64>,
    gap: Option<f64>,
}

impl YamlConfig {
    fn into_layout_config(self, mut cfg: LayoutConfig) -> LayoutConfig {
        if let Some(v) = self.viewport_width {
            cfg.viewport_width = v;
        }
        if let Some(v) = self.ideal_height {
            cfg.ideal_height = v;
        }
        if let Some(v) = self.gap {
            cfg.gap = v;
        }
        cfg
    }
}
