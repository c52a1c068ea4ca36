mod cli;

use clap::Parser;
use cli::{Cli, Command};
use tracing_subscriber::EnvFilter;
use xdo::{SearchFlags, Session, SizeUnits, X11Display, XdoError};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let name = cli.command.name();

    let session = match Session::open(cli.display.as_deref()) {
        Ok(session) => session,
        Err(e) => {
            tracing::error!(error = %e, "session setup failed");
            eprintln!("xdo {name}: {e}");
            std::process::exit(1);
        }
    };

    let result = run(&session, cli.command);
    // Tear down before exiting; `exit` skips destructors.
    drop(session);

    if let Err(e) = result {
        tracing::error!(command = name, error = %e, "command failed");
        eprintln!("xdo {name}: {e}");
        std::process::exit(1);
    }
}

fn run(session: &Session<X11Display>, command: Command) -> Result<(), XdoError> {
    match command {
        Command::Search { fields, pattern } => {
            let flags = SearchFlags {
                title: fields.title,
                class: fields.class,
                name: fields.name,
                only_visible: fields.onlyvisible,
            };
            for window in session.search_windows(&pattern, flags)? {
                println!("{window}");
            }
        }
        Command::GetWindowFocus => println!("{}", session.focused_window()?),
        Command::WindowMove { window, x, y } => session.move_window(window, x, y)?,
        Command::WindowSize {
            usehints,
            window,
            width,
            height,
        } => {
            let units = if usehints {
                SizeUnits::Hints
            } else {
                SizeUnits::Pixels
            };
            session.set_window_size(window, width, height, units)?;
        }
        Command::WindowFocus { window } => session.focus_window(window)?,
        Command::WindowRaise { window } => session.raise_window(window)?,
        Command::WindowMap { window } => session.map_window(window)?,
        Command::WindowUnmap { window } => session.unmap_window(window)?,
        Command::MouseMove { x, y } => session.mouse_move(x, y)?,
        Command::MouseDown { button } => session.mouse_down(button)?,
        Command::MouseUp { button } => session.mouse_up(button)?,
        Command::Click { button } => session.click(button)?,
        Command::Type { texts } => {
            for text in texts {
                let report = session.type_text(&text)?;
                if report.resolved < report.attempted {
                    tracing::info!(
                        attempted = report.attempted,
                        resolved = report.resolved,
                        "some characters could not be typed"
                    );
                }
            }
        }
        Command::Key { sequences } => {
            for sequence in sequences {
                session.key(&sequence)?;
            }
        }
        Command::KeyDown { sequences } => {
            for sequence in sequences {
                session.key_down(&sequence)?;
            }
        }
        Command::KeyUp { sequences } => {
            for sequence in sequences {
                session.key_up(&sequence)?;
            }
        }
    }

    tracing::debug!(
        display = session.display_name(),
        keycodes = ?session.keycode_range(),
        charcodes = session.charcodes().entries().len(),
        "command complete"
    );
    Ok(())
}
