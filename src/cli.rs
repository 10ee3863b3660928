use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use crate::types::DeleteStyle;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Parser)]
#[command(name = "userdir")]
#[command(about = "List and edit users held by a remote directory service", version)]
#[command(after_help = "EXAMPLES:
    userdir list                          List users on the default endpoint
    userdir --endpoint staging list       List users on a configured endpoint
    userdir create \"Ann Lee\"              Add a user
    userdir rename 2 \"Bo\"                 Rename user 2
    userdir delete 2                      Delete user 2
    userdir shell                         Edit interactively")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Endpoint to use: a configured name or an http(s) URL
    #[arg(long, short, global = true)]
    pub endpoint: Option<String>,

    /// How an ad-hoc URL endpoint expects delete ids
    #[arg(long, global = true, value_enum, default_value = "form")]
    pub delete_style: DeleteStyle,

    /// Output format (table, json)
    #[arg(long, short = 'o', global = true, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Output as JSON (alias for --format json)
    #[arg(long, global = true, hide = true)]
    pub json: bool,

    /// Suppress success messages
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Show detailed error information and debug logs
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Get the effective output format, considering --json flag
    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            self.format
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// List users
    #[command(
        alias = "ls",
        after_help = "EXAMPLES:
    userdir list
    userdir list --json
    userdir --endpoint http://localhost:8080/users list"
    )]
    List,
    /// Add a user
    #[command(
        alias = "add",
        after_help = "EXAMPLES:
    userdir create \"Ann Lee\""
    )]
    Create {
        /// Name of the new user
        name: String,
    },
    /// Rename a user
    #[command(after_help = "EXAMPLES:
    userdir rename 2 \"Bo\"")]
    Rename {
        /// User id as shown by 'userdir list'
        id: String,
        /// New name
        name: String,
    },
    /// Delete a user
    #[command(
        alias = "rm",
        after_help = "EXAMPLES:
    userdir delete 2"
    )]
    Delete {
        /// User id as shown by 'userdir list'
        id: String,
    },
    /// List configured endpoints
    #[command(after_help = "EXAMPLES:
    userdir endpoints
    userdir endpoints --json")]
    Endpoints,
    /// Interactive shell over the user list
    #[command(after_help = "EXAMPLES:
    userdir shell
    userdir --endpoint staging shell")]
    Shell,
    /// Generate shell completions
    #[command(after_help = "EXAMPLES:
    userdir completions bash > ~/.bash_completion.d/userdir
    userdir completions zsh > ~/.zfunc/_userdir
    userdir completions fish > ~/.config/fish/completions/userdir.fish")]
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
    /// Initialize configuration file interactively
    #[command(after_help = "EXAMPLES:
    userdir init")]
    Init,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "userdir",
            "delete",
            "7",
            "--endpoint",
            "http://localhost/users",
            "--delete-style",
            "query",
            "--json",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Delete { ref id } if id == "7"));
        assert_eq!(cli.endpoint.as_deref(), Some("http://localhost/users"));
        assert_eq!(cli.delete_style, DeleteStyle::Query);
        assert_eq!(cli.output_format(), OutputFormat::Json);
    }
}
