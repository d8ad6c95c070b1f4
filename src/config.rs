use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Open the window switcher (default if no command specified)
    Show,
    /// Print the windows matching a query, best match first
    List {
        /// Search text; lists every window when omitted
        query: Option<String>,

        /// Print JSON instead of plain lines
        #[arg(long)]
        json: bool,
    },
    /// Focus the best match for a query without opening the switcher
    Focus {
        /// Search text
        query: String,
    },
}

#[derive(Debug, Clone, Parser)]
#[command(name = "hypr-switcher")]
#[command(about = "Searchable window switcher for Hyprland", long_about = None)]
pub struct Config {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Stylesheet to load instead of ~/.config/hypr-switcher/style.css
    #[arg(long, value_name = "PATH", global = true)]
    pub style: Option<PathBuf>,

    /// hyprctl executable used to query and focus windows
    #[arg(long, value_name = "PROGRAM", default_value = "hyprctl", global = true)]
    pub hyprctl: String,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Config {
    pub fn parse() -> Self {
        <Config as Parser>::parse()
    }

    /// Get the command, defaulting to Show if none specified
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Show)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Config {
        Config::try_parse_from(std::iter::once("hypr-switcher").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = parse(&[]);
        assert!(!config.verbose);
        assert!(config.style.is_none());
        assert_eq!(config.hyprctl, "hyprctl");
        assert_eq!(config.command(), Command::Show);
    }

    #[test]
    fn test_list_command() {
        let config = parse(&["list", "fire", "--json"]);
        assert_eq!(
            config.command(),
            Command::List {
                query: Some("fire".to_string()),
                json: true,
            }
        );

        let config = parse(&["list"]);
        assert_eq!(
            config.command(),
            Command::List {
                query: None,
                json: false,
            }
        );
    }

    #[test]
    fn test_focus_requires_query() {
        let config = parse(&["focus", "term"]);
        assert_eq!(
            config.command(),
            Command::Focus {
                query: "term".to_string(),
            }
        );

        assert!(Config::try_parse_from(["hypr-switcher", "focus"]).is_err());
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let config = parse(&["show", "-v", "--style", "/tmp/s.css", "--hyprctl", "/opt/hyprctl"]);
        assert!(config.verbose);
        assert_eq!(config.style, Some(PathBuf::from("/tmp/s.css")));
        assert_eq!(config.hyprctl, "/opt/hyprctl");
    }
}
