use clap::{Args, Parser, Subcommand};

use xdo::Window;

#[derive(Parser)]
#[command(name = "xdo", about = "Fake keyboard/mouse input and window management for X11")]
pub struct Cli {
    /// X display to connect to (defaults to $DISPLAY)
    #[arg(long, global = true)]
    pub display: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the ids of windows whose title, class, or name matches a regex
    Search {
        #[command(flatten)]
        fields: SearchArgs,

        /// Case-insensitive extended regular expression
        pattern: String,
    },

    /// Print the id of the window holding the input focus
    #[command(name = "getwindowfocus")]
    GetWindowFocus,

    /// Move a window
    #[command(name = "windowmove")]
    WindowMove {
        #[arg(value_parser = parse_window)]
        window: Window,
        #[arg(allow_negative_numbers = true)]
        x: i32,
        #[arg(allow_negative_numbers = true)]
        y: i32,
    },

    /// Resize a window
    #[command(name = "windowsize")]
    WindowSize {
        /// Interpret width and height in the window's resize increments
        #[arg(long)]
        usehints: bool,
        #[arg(value_parser = parse_window)]
        window: Window,
        width: i32,
        height: i32,
    },

    /// Give a window the input focus
    #[command(name = "windowfocus")]
    WindowFocus {
        #[arg(value_parser = parse_window)]
        window: Window,
    },

    /// Raise a window to the top of the stack
    #[command(name = "windowraise")]
    WindowRaise {
        #[arg(value_parser = parse_window)]
        window: Window,
    },

    /// Map (show) a window
    #[command(name = "windowmap")]
    WindowMap {
        #[arg(value_parser = parse_window)]
        window: Window,
    },

    /// Unmap (hide) a window
    #[command(name = "windowunmap")]
    WindowUnmap {
        #[arg(value_parser = parse_window)]
        window: Window,
    },

    /// Move the pointer to absolute coordinates
    #[command(name = "mousemove")]
    MouseMove {
        #[arg(allow_negative_numbers = true)]
        x: i32,
        #[arg(allow_negative_numbers = true)]
        y: i32,
    },

    /// Press a pointer button
    #[command(name = "mousedown")]
    MouseDown { button: u8 },

    /// Release a pointer button
    #[command(name = "mouseup")]
    MouseUp { button: u8 },

    /// Press and release a pointer button
    Click { button: u8 },

    /// Type each argument as text
    Type {
        #[arg(required = true)]
        texts: Vec<String>,
    },

    /// Press and release key sequences such as ctrl+alt+Delete
    Key {
        #[arg(required = true)]
        sequences: Vec<String>,
    },

    /// Press key sequences without releasing them
    #[command(name = "keydown")]
    KeyDown {
        #[arg(required = true)]
        sequences: Vec<String>,
    },

    /// Release key sequences
    #[command(name = "keyup")]
    KeyUp {
        #[arg(required = true)]
        sequences: Vec<String>,
    },
}

#[derive(Args)]
pub struct SearchArgs {
    /// Match against the window title
    #[arg(long)]
    pub title: bool,

    /// Match against the window class
    #[arg(long)]
    pub class: bool,

    /// Match against the window instance name
    #[arg(long)]
    pub name: bool,

    /// Only consider viewable windows
    #[arg(long)]
    pub onlyvisible: bool,
}

impl Command {
    /// Subcommand name, for error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Search { .. } => "search",
            Command::GetWindowFocus => "getwindowfocus",
            Command::WindowMove { .. } => "windowmove",
            Command::WindowSize { .. } => "windowsize",
            Command::WindowFocus { .. } => "windowfocus",
            Command::WindowRaise { .. } => "windowraise",
            Command::WindowMap { .. } => "windowmap",
            Command::WindowUnmap { .. } => "windowunmap",
            Command::MouseMove { .. } => "mousemove",
            Command::MouseDown { .. } => "mousedown",
            Command::MouseUp { .. } => "mouseup",
            Command::Click { .. } => "click",
            Command::Type { .. } => "type",
            Command::Key { .. } => "key",
            Command::KeyDown { .. } => "keydown",
            Command::KeyUp { .. } => "keyup",
        }
    }
}

/// Parse a window id given in decimal or `0x` hex.
fn parse_window(s: &str) -> Result<Window, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => Window::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|e| format!("invalid window id {s:?}: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn window_ids_decimal_and_hex() {
        assert_eq!(parse_window("12345"), Ok(12345));
        assert_eq!(parse_window("0x1e00003"), Ok(0x1e0_0003));
        assert!(parse_window("xterm").is_err());
        assert!(parse_window("0x").is_err());
    }

    #[test]
    fn search_flags_parse() {
        let cli = Cli::parse_from(["xdo", "search", "--class", "--onlyvisible", "firefox"]);
        match cli.command {
            Command::Search { fields, pattern } => {
                assert!(fields.class && fields.onlyvisible);
                assert!(!fields.title && !fields.name);
                assert_eq!(pattern, "firefox");
            }
            _ => panic!("expected search"),
        }
    }

    #[test]
    fn negative_coordinates_parse() {
        let cli = Cli::parse_from(["xdo", "windowmove", "0x400001", "-10", "-20"]);
        match cli.command {
            Command::WindowMove { window, x, y } => {
                assert_eq!((window, x, y), (0x40_0001, -10, -20));
            }
            _ => panic!("expected windowmove"),
        }
    }

    #[test]
    fn global_display_option() {
        let cli = Cli::parse_from(["xdo", "key", "--display", ":1", "ctrl+l"]);
        assert_eq!(cli.display.as_deref(), Some(":1"));
        assert_eq!(cli.command.name(), "key");
    }
}
