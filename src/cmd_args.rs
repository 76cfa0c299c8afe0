use std::ffi::OsString;

pub use clap::Parser;
use clap::Subcommand;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct ClapArgs {
    /// Profile name
    /// Profile to read the backend settings from. Default is 'default'.
    /// If the profile is not configured, the public MyMDB backend is used.
    #[clap(short = 'p', long, default_value = "default", help = "profile name")]
    profile: String,

    /// Verbose mode
    /// Optional. Also print navigation events.
    #[clap(
        short = 'v',
        long,
        help = "Also print navigation events",
        default_value = "false"
    )]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create a new account
    Register {
        #[clap(short, long)]
        username: String,
        #[clap(short = 'w', long)]
        password: String,
        #[clap(short, long)]
        email: String,
        #[clap(short, long)]
        birthday: Option<String>,
    },
    /// Log in and store the session
    Login {
        #[clap(short, long)]
        username: String,
        #[clap(short = 'w', long)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show whether a session is stored
    Status,
    /// List all movies, marking favorites
    Movies,
    /// Show one movie by id
    Movie { id: String },
    /// Show one movie by title
    MovieTitle { title: String },
    /// Show a director by name
    Director { name: String },
    /// Show a genre by name
    Genre { name: String },
    /// Show the profile and favorite movies
    Profile,
    /// Change profile fields; fields left out keep their value
    UpdateProfile {
        #[clap(short, long)]
        username: Option<String>,
        #[clap(short = 'w', long)]
        password: Option<String>,
        #[clap(short, long)]
        email: Option<String>,
        #[clap(short, long)]
        birthday: Option<String>,
    },
    /// Delete the account
    DeleteAccount {
        /// Confirm the deletion; it cannot be undone
        #[clap(long)]
        yes: bool,
    },
    /// Manage favorite movies
    Favorite {
        #[command(subcommand)]
        action: FavoriteAction,
    },
    /// Show which screen a path resolves to
    Route { path: String },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum FavoriteAction {
    Add { movie_id: String },
    Remove { movie_id: String },
    Toggle { movie_id: String },
}

#[derive(Debug, Clone)]
pub struct CommandLineArgs {
    profile: String,
    verbose: bool,
    command: Command,
}

impl From<ClapArgs> for CommandLineArgs {
    fn from(args: ClapArgs) -> Self {
        Self {
            profile: args.profile,
            verbose: args.verbose,
            command: args.command,
        }
    }
}

impl CommandLineArgs {
    pub fn parse() -> Self {
        ClapArgs::parse().into()
    }

    pub fn parse_from<I, T>(itr: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        ClapArgs::parse_from(itr).into()
    }

    pub fn try_parse_from<I, T>(itr: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        ClapArgs::try_parse_from(itr).map(Into::into)
    }

    pub fn profile(&self) -> &String {
        &self.profile
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_args_profile_and_command() {
        let args = CommandLineArgs::parse_from(["program", "--profile", "test", "movies"]);
        assert_eq!(args.profile(), "test");
        assert!(!args.verbose());
        assert_eq!(args.command(), &Command::Movies);
    }

    #[test]
    fn test_parse_args_short_flags() {
        let args = CommandLineArgs::parse_from(["program", "-p", "dev", "-v", "status"]);
        assert_eq!(args.profile(), "dev");
        assert!(args.verbose());
    }

    #[test]
    fn test_default_values() {
        let args = CommandLineArgs::parse_from(["program", "logout"]);
        assert_eq!(args.profile(), "default");
        assert!(!args.verbose());
    }

    #[test]
    fn test_parse_login() {
        let args = CommandLineArgs::parse_from([
            "program", "login", "--username", "ripley", "--password", "nostromo",
        ]);
        assert_eq!(
            args.command(),
            &Command::Login {
                username: "ripley".to_string(),
                password: "nostromo".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_favorite_subcommand() {
        let args = CommandLineArgs::parse_from(["program", "favorite", "add", "m1"]);
        assert_eq!(
            args.command(),
            &Command::Favorite {
                action: FavoriteAction::Add {
                    movie_id: "m1".to_string()
                }
            }
        );
    }

    #[test]
    fn test_parse_movie_title_with_spaces() {
        let args = CommandLineArgs::parse_from(["program", "movie-title", "The Thing"]);
        assert_eq!(
            args.command(),
            &Command::MovieTitle {
                title: "The Thing".to_string()
            }
        );
    }

    #[test]
    fn test_missing_command_is_an_error() {
        assert!(CommandLineArgs::try_parse_from(["program"]).is_err());
    }

    #[test]
    fn test_register_requires_email() {
        let result = CommandLineArgs::try_parse_from([
            "program", "register", "-u", "ripley", "-w", "nostromo",
        ]);
        assert!(result.is_err());
    }
}
