mod app;
mod ui;

use std::io::{Stdout, stdout};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, MouseButton,
        MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use markdown_furigana_config::{FileStore, SettingsStore, Visibility};
use markdown_furigana_engine::{
    Document, RenderOptions, Selection, SelectionRange, decorate, io, io::IoError,
    parsing::rope::preview, render_markdown,
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{App, action_for};

#[derive(Parser)]
#[command(version, about = "Ruby (furigana) annotations for Markdown", long_about = None)]
struct Cli {
    /// Settings file (defaults to ~/.config/markdown-furigana/settings.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a Markdown file to HTML with annotations replaced by ruby markup
    Render {
        file: PathBuf,

        /// Write the HTML here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Flip furigana visibility and save it
    Toggle,
    /// Print the live-view decorations for a file and a set of carets
    Decorations {
        file: PathBuf,

        /// Caret byte offset; repeat for several carets
        #[arg(long = "cursor")]
        cursors: Vec<usize>,
    },
    /// Edit a file in the terminal live view
    Edit { file: PathBuf },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // The editor owns the terminal, so it only logs when asked to.
    let default_level = match cli.command {
        Commands::Edit { .. } => log::LevelFilter::Off,
        _ => log::LevelFilter::Warn,
    };
    env_logger::Builder::new()
        .filter_level(default_level)
        .parse_default_env()
        .init();

    let store = match &cli.config {
        Some(path) => FileStore::new(path),
        None => FileStore::at_default_path(),
    };
    log::debug!("settings file: {}", store.path().display());

    match cli.command {
        Commands::Render { file, output } => render(&file, output.as_deref(), &store),
        Commands::Toggle => toggle(store),
        Commands::Decorations { file, cursors } => decorations(&file, &cursors),
        Commands::Edit { file } => edit(file, store),
    }
}

fn render(file: &Path, output: Option<&Path>, store: &FileStore) -> Result<()> {
    let content = io::read_file(file)?;
    let settings = store.load().unwrap_or_else(|e| {
        log::warn!("{e}; using default settings");
        Default::default()
    });
    let html = render_markdown(
        &content,
        &RenderOptions {
            furigana_visible: settings.furigana_visible,
        },
    );

    match output {
        Some(path) => {
            io::write_file(path, &html)?;
            log::info!("wrote {}", path.display());
        }
        None => print!("{html}"),
    }
    Ok(())
}

fn toggle(store: FileStore) -> Result<()> {
    let path = store.path().to_path_buf();
    let mut visibility = Visibility::load_or_default(store);
    let visible = visibility
        .toggle()
        .with_context(|| format!("saving {}", path.display()))?;
    println!("furigana {}", if visible { "visible" } else { "hidden" });
    Ok(())
}

fn decorations(file: &Path, cursors: &[usize]) -> Result<()> {
    let content = io::read_file(file)?;
    let mut document = Document::from_text(&content);
    document.set_selection(Selection::from_ranges(
        cursors
            .iter()
            .map(|&at| SelectionRange::cursor(at)),
    ));

    let set = decorate(document.rope(), document.selection(), None);
    for deco in &set {
        let line = document.line_of_offset(deco.from()) + 1;
        println!(
            "{line}\t{}..{}\t{}\t{}\t{}",
            deco.from(),
            deco.to(),
            preview(document.rope(), deco.span, 40),
            deco.widget.ruby.base_text(),
            deco.widget.to_text(true)
        );
    }
    log::info!("{} decorations", set.len());
    Ok(())
}

fn edit(file: PathBuf, store: FileStore) -> Result<()> {
    io::validate_markdown_path(&file)?;
    let content = match io::read_file(&file) {
        Ok(content) => content,
        Err(IoError::NotFound(_)) => String::new(),
        Err(e) => return Err(e.into()),
    };
    let visibility = Visibility::load_or_default(store);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(file, &content, visibility);
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if app.is_dirty() {
        eprintln!("{} has unsaved changes", app.path().display());
    }
    res
}

fn run_app<S: SettingsStore>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App<S>,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::ui(f, app))?;

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                let action = action_for(&key, app.toggle_command());
                if !app.perform(action) {
                    return Ok(());
                }
            }
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                app.click(mouse.column, mouse.row);
            }
            _ => {}
        }
    }
}
