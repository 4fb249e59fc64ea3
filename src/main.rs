use std::fs::{self, OpenOptions};
use std::io::{Write, stdout};
use std::time::Instant;

use clap::Parser;
use color_eyre::Result;
use crossterm::event::{
    self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
};
use ratatui::DefaultTerminal;
use tokio::runtime::Handle;

use smart_textarea::Components;
use smart_textarea::app::App;
use smart_textarea::cli::Cli;
use smart_textarea::config::Config;
use smart_textarea::element::{ElementStyle, Sibling, TextInput};

fn main() -> Result<()> {
    // Install color-eyre panic hook for better error messages
    color_eyre::install()?;

    let cli = Cli::parse();
    let config = cli.resolve_config()?;

    if cli.print_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    init_logging();

    // Fetches run on a single-threaded runtime parked on its own thread
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let handle = runtime.handle().clone();
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
    let runtime_thread = std::thread::spawn(move || {
        runtime.block_on(async {
            let _ = shutdown_rx.await;
        });
    });

    // Initialize terminal (handles raw mode, alternate screen, etc.)
    let terminal = ratatui::init();
    crossterm::execute!(stdout(), EnableMouseCapture, EnableFocusChange)?;

    let result = run(terminal, &config, handle);

    // Restore terminal (automatic cleanup)
    crossterm::execute!(stdout(), DisableMouseCapture, DisableFocusChange)?;
    ratatui::restore();

    let _ = shutdown_tx.send(());
    let _ = runtime_thread.join();

    result
}

fn run(mut terminal: DefaultTerminal, config: &Config, runtime: Handle) -> Result<()> {
    let size = terminal.size()?;
    let settings = config.component_settings(f64::from(size.width), 1.0);
    let components = Components::init(settings, runtime)?;

    let mut smart = components.text_area(config.attributes())?;
    let element = TextInput::textarea()
        .with_style(ElementStyle::terminal(size.width, size.height))
        .focused();
    smart.attach(Sibling::Input(element))?;

    let mut app = App::new(smart);
    loop {
        terminal.draw(|frame| app.render(frame))?;

        if event::poll(app.poll_timeout(Instant::now()))? {
            app.handle_event(event::read()?, Instant::now());
        }
        app.tick(Instant::now());

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}

/// Log to a file; the terminal belongs to the UI
fn init_logging() {
    let Some(dir) = dirs::cache_dir().map(|p| p.join("smart-textarea")) else {
        return;
    };
    if fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("smart-textarea.log"))
    else {
        return;
    };

    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} {:<5} {}: {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .try_init();
}
