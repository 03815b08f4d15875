use clap::Parser;
use std::path::PathBuf;

/// Attach a link to the pushed branch onto the Trello card named in it.
///
/// The card is found from the last `#<number>` in the branch name, e.g.
/// `feature/#123-add-login` links to card 123 on the configured board.
#[derive(Debug, Parser)]
#[command(name = "trello-branch-link", version)]
pub struct Cli {
    /// Trello API key
    #[arg(long, env = "TRELLO_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Trello auth token
    #[arg(long, env = "TRELLO_AUTH_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Board the card must belong to
    #[arg(long, env = "TRELLO_BOARD_ID")]
    pub board_id: Option<String>,

    /// Trello REST base URL
    #[arg(long, env = "TRELLO_API_BASE")]
    pub api_base: Option<String>,

    /// Git reference that triggered the run, e.g. refs/heads/feature/#123-login
    #[arg(long = "ref", env = "GITHUB_REF")]
    pub git_ref: Option<String>,

    /// Repository as owner/name
    #[arg(long, env = "GITHUB_REPOSITORY")]
    pub repository: String,

    /// Base URL of the git server
    #[arg(long, env = "GITHUB_SERVER_URL")]
    pub server_url: Option<String>,

    /// Config file with api_key, token, board_id and api_base
    #[arg(long, env = "TRELLO_BRANCH_LINK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long)]
    pub verbose: bool,
}

/// Environment name a CI runner uses for an action input, e.g.
/// `trello-api-key` becomes `INPUT_TRELLO-API-KEY`.
pub fn action_input_var(name: &str) -> String {
    format!("INPUT_{}", name.replace(' ', "_").to_uppercase())
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}

impl Cli {
    /// Fill credentials that were not given directly, or were given empty,
    /// from action inputs.
    pub fn with_action_inputs(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let input = |name: &str| lookup(&action_input_var(name)).filter(|v| !v.trim().is_empty());
        if is_blank(&self.api_key) {
            self.api_key = input("trello-api-key").or(self.api_key);
        }
        if is_blank(&self.token) {
            self.token = input("trello-auth-token").or(self.token);
        }
        if is_blank(&self.board_id) {
            self.board_id = input("trello-board-id").or(self.board_id);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["trello-branch-link"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn action_input_names() {
        assert_eq!(action_input_var("trello-api-key"), "INPUT_TRELLO-API-KEY");
        assert_eq!(action_input_var("board id"), "INPUT_BOARD_ID");
    }

    #[test]
    fn parses_all_flags() {
        let cli = parse(&[
            "--api-key",
            "k",
            "--token",
            "t",
            "--board-id",
            "b",
            "--ref",
            "refs/heads/feature/#1",
            "--repository",
            "acme/app",
            "--server-url",
            "https://git.example.com",
            "-v",
        ]);
        assert_eq!(cli.api_key.as_deref(), Some("k"));
        assert_eq!(cli.git_ref.as_deref(), Some("refs/heads/feature/#1"));
        assert_eq!(cli.repository, "acme/app");
        assert!(cli.verbose);
    }

    #[test]
    fn action_inputs_fill_gaps_only() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("INPUT_TRELLO-API-KEY", "input-key"),
            ("INPUT_TRELLO-AUTH-TOKEN", "input-token"),
            ("INPUT_TRELLO-BOARD-ID", ""),
        ]);
        let cli = Cli {
            token: Some("flag-token".into()),
            ..Cli::bare("acme/app")
        }
        .with_action_inputs(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(cli.api_key.as_deref(), Some("input-key"));
        assert_eq!(cli.token.as_deref(), Some("flag-token"));
        assert_eq!(cli.board_id, None);
    }

    #[test]
    fn empty_env_value_falls_back_to_action_input() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("TRELLO_API_KEY", ""),
            ("INPUT_TRELLO-API-KEY", "input-key"),
            ("INPUT_TRELLO-AUTH-TOKEN", "input-token"),
        ]);
        let cli = Cli {
            api_key: Some(String::new()),
            token: Some("   ".into()),
            ..Cli::bare("acme/app")
        }
        .with_action_inputs(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(cli.api_key.as_deref(), Some("input-key"));
        assert_eq!(cli.token.as_deref(), Some("input-token"));
    }
}

#[cfg(test)]
impl Cli {
    /// A `Cli` with nothing set but the repository, independent of the
    /// process environment.
    pub fn bare(repository: &str) -> Self {
        Self {
            api_key: None,
            token: None,
            board_id: None,
            api_base: None,
            git_ref: None,
            repository: repository.to_string(),
            server_url: None,
            config: None,
            verbose: false,
        }
    }
}
