//! Command building for shell execution.

/// A command specification, normalized to a single shell-safe string by
/// [`Command::build`].
///
/// The `Raw` form is executed verbatim and is the deliberate escape hatch for
/// pre-built shell pipelines (`"false; true"`, redirections, globs). The
/// caller is responsible for its safety; anything interpolated from untrusted
/// input belongs in `Argv`, where every token is escaped individually.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// A raw command string, passed to the shell unchanged.
    Raw(String),
    /// An ordered sequence of argument tokens, shell-escaped per token.
    Argv(Vec<String>),
}

impl Command {
    /// Produces the string handed to the shell.
    ///
    /// Argv tokens are escaped such that re-parsing the result with a POSIX
    /// shell yields exactly the original tokens, with no word-splitting or
    /// glob expansion introduced by the join.
    pub fn build(&self) -> String {
        match self {
            Command::Raw(command) => command.clone(),
            Command::Argv(tokens) => shell_words::join(tokens),
        }
    }
}

impl From<&str> for Command {
    fn from(command: &str) -> Self {
        Command::Raw(command.to_string())
    }
}

impl From<String> for Command {
    fn from(command: String) -> Self {
        Command::Raw(command)
    }
}

impl From<Vec<String>> for Command {
    fn from(tokens: Vec<String>) -> Self {
        Command::Argv(tokens)
    }
}

impl From<Vec<&str>> for Command {
    fn from(tokens: Vec<&str>) -> Self {
        Command::Argv(tokens.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for Command {
    fn from(tokens: &[&str]) -> Self {
        Command::Argv(tokens.iter().map(|t| t.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Command {
    fn from(tokens: [&str; N]) -> Self {
        Command::Argv(tokens.iter().map(|t| t.to_string()).collect())
    }
}
