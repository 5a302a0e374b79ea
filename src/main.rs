use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::Context;
use clap::{Parser, Subcommand};

use statsgrid::{CaptionPosition, StatsGrid};

#[derive(Parser)]
#[command(name = "statsgrid", version)]
#[command(about = "Render grids of statistic cells to embeddable HTML")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a JSON grid description to HTML
    Render {
        /// Input .json grid description
        file: PathBuf,

        /// Write output to file instead of stdout
        #[arg(short)]
        o: Option<PathBuf>,

        /// Caption text (overrides the file)
        #[arg(long)]
        caption: Option<String>,

        /// Caption position, e.g. "bottom center" (overrides the file)
        #[arg(long)]
        caption_position: Option<CaptionPosition>,

        /// Base font size in pixels (overrides the file)
        #[arg(long)]
        font_size: Option<u32>,

        /// Extra CSS class on the grid (repeatable)
        #[arg(long = "class")]
        classes: Vec<String>,
    },

    /// Render every .json grid description in a directory
    Build {
        /// Input directory containing .json files
        dir: PathBuf,

        /// Output directory for rendered files
        #[arg(long, default_value = "dist")]
        outdir: PathBuf,
    },

    /// Print the text color and gradient for a cell color
    Gradient {
        /// Palette name (e.g. "warning") or hex color
        color: String,
    },

    /// List the builtin palette
    Colors,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            file,
            o,
            caption,
            caption_position,
            font_size,
            classes,
        } => {
            let mut grid = match load_grid(&file) {
                Ok(g) => g,
                Err(e) => {
                    eprintln!("error: {e:#}");
                    process::exit(1);
                }
            };

            if let Some(caption) = caption {
                grid = grid.with_caption(caption);
            }
            if let Some(position) = caption_position {
                grid = grid.with_caption_position(position);
            }
            if let Some(px) = font_size {
                grid = grid.with_font_size(px);
            }
            for class in classes {
                grid = grid.with_class(class);
            }

            let html = match grid.to_html() {
                Ok(h) => h,
                Err(e) => {
                    eprintln!("error: {}: {e}", file.display());
                    process::exit(1);
                }
            };

            if let Some(out_path) = o {
                match fs::write(&out_path, &html) {
                    Ok(()) => {
                        eprintln!(
                            "wrote HTML to {} ({} bytes)",
                            out_path.display(),
                            html.len()
                        );
                    }
                    Err(e) => {
                        eprintln!("error: cannot write '{}': {e}", out_path.display());
                        process::exit(1);
                    }
                }
            } else {
                print!("{html}");
            }
        }

        Commands::Build { dir, outdir } => {
            if !dir.is_dir() {
                eprintln!("error: '{}' is not a directory", dir.display());
                process::exit(1);
            }

            fs::create_dir_all(&outdir).unwrap_or_else(|e| {
                eprintln!("error: cannot create output dir '{}': {e}", outdir.display());
                process::exit(1);
            });

            let entries = match json_files(&dir) {
                Ok(entries) => entries,
                Err(e) => {
                    eprintln!("error: {e:#}");
                    process::exit(1);
                }
            };

            let mut rendered = 0;
            let mut errors = 0;

            for path in entries {
                let out_file = statsgrid::output_path(&path, &outdir);
                match render_file(&path, &out_file) {
                    Ok(bytes) => {
                        eprintln!("  {} -> {} ({bytes} bytes)", path.display(), out_file.display());
                        rendered += 1;
                    }
                    Err(e) => {
                        eprintln!("  error: {}: {e:#}", path.display());
                        errors += 1;
                    }
                }
            }

            eprintln!("built {rendered} grids ({errors} errors)");

            if errors > 0 {
                process::exit(1);
            }
        }

        Commands::Gradient { color } => {
            let hex = statsgrid::resolve_color_alias(&color).unwrap_or(color.as_str());
            match statsgrid::build_gradient(hex) {
                Ok(g) => {
                    println!("foreground: {}", g.foreground);
                    println!("background: {}", g.css);
                }
                Err(e) => {
                    eprintln!("error: {e}");
                    process::exit(1);
                }
            }
        }

        Commands::Colors => {
            for c in statsgrid::color::builtin_colors() {
                if c.aliases.is_empty() {
                    println!("{:<8} {}", c.name, c.hex);
                } else {
                    println!("{:<8} {}  ({})", c.name, c.hex, c.aliases.join(", "));
                }
            }
        }
    }
}

fn load_grid(path: &Path) -> anyhow::Result<StatsGrid> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("cannot read '{}'", path.display()))?;
    let grid = StatsGrid::from_json(&source)
        .with_context(|| format!("cannot parse '{}'", path.display()))?;
    log::info!(
        "loaded {}: {} rows, {} cells",
        path.display(),
        grid.rows.len(),
        grid.cell_count()
    );
    Ok(grid)
}

fn render_file(input: &Path, output: &Path) -> anyhow::Result<usize> {
    let html = load_grid(input)?.to_html()?;
    fs::write(output, &html).with_context(|| format!("cannot write {}", output.display()))?;
    Ok(html.len())
}

fn json_files(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .with_context(|| format!("cannot read '{}'", dir.display()))?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().map(|ext| ext == "json").unwrap_or(false))
        .collect();
    files.sort();
    Ok(files)
}
