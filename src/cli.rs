//! The command-line interface for `descent`.
//!
//! Usage (as with any other [`argh`] interface) involves first invoking [`argh::from_env()`], and
//! then processing the resulting data (in this case an instance of [`Cli`]).

#![allow(clippy::missing_docs_in_private_items)]

use std::path::{Path, PathBuf};

use anyhow::Context;
use argh::FromArgs;
use tracing::info;

use descent::calc;

/// Lexes, parses and compiles programs in the `calc` demonstration language.
#[derive(Debug, Clone, FromArgs)]
pub struct Cli {
    #[argh(subcommand)]
    cmd: CliSubCommand,
}

impl Cli {
    /// Consumes `self` and processes the given subcommand.
    pub fn handle(self) -> anyhow::Result<()> {
        match self.cmd {
            CliSubCommand::Tokens(args) => args.run(),
            CliSubCommand::Tree(args) => args.run(),
            CliSubCommand::Compile(args) => args.run(),
        }
    }
}

/// The set of the distinct subcommands available to be passed to the [`Cli`].
#[derive(Debug, Clone, FromArgs)]
#[argh(subcommand)]
enum CliSubCommand {
    Tokens(Tokens),
    Tree(Tree),
    Compile(Compile),
}

/// Reads `path` into a string, naming the file in the error on failure.
fn read_source(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("could not read {}", path.display()))
}

/// Prints the tokens of a .calc file, one per line.
#[derive(Debug, Clone, FromArgs)]
#[argh(subcommand, name = "tokens")]
struct Tokens {
    /// a path to a .calc file
    #[argh(positional)]
    file: PathBuf,
}

impl Tokens {
    fn run(self) -> anyhow::Result<()> {
        let source = read_source(&self.file)?;
        let name = self.file.display().to_string();
        let tokens = calc::lexer()?.lex(&name, &source)?;
        info!(file = %name, count = tokens.len(), "lexed");

        for token in tokens {
            println!("{} {token}", token.location());
        }
        Ok(())
    }
}

/// Prints the syntax tree of a .calc file.
#[derive(Debug, Clone, FromArgs)]
#[argh(subcommand, name = "tree")]
struct Tree {
    /// a path to a .calc file
    #[argh(positional)]
    file: PathBuf,
}

impl Tree {
    fn run(self) -> anyhow::Result<()> {
        let source = read_source(&self.file)?;
        let name = self.file.display().to_string();
        let tokens = calc::lexer()?.lex(&name, &source)?;
        let tree = calc::parse(&name, &tokens)?;
        info!(file = %name, "parsed");

        println!("{tree}");
        Ok(())
    }
}

/// Compiles a .calc file to C, printing the result unless --output is given.
#[derive(Debug, Clone, FromArgs)]
#[argh(subcommand, name = "compile")]
struct Compile {
    /// write the generated C to this path
    #[argh(option, short = 'o')]
    output: Option<PathBuf>,

    /// a path to a .calc file
    #[argh(positional)]
    file: PathBuf,
}

impl Compile {
    fn run(self) -> anyhow::Result<()> {
        let source = read_source(&self.file)?;
        let name = self.file.display().to_string();
        let code = calc::compile(&name, &source)?;
        info!(file = %name, "compiled");

        match self.output {
            Some(path) => std::fs::write(&path, code)
                .with_context(|| format!("could not write {}", path.display())),
            None => {
                print!("{code}");
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_cli_parsing() {
        let cli = Cli::from_args(&["descent"], &["compile", "-o", "out.c", "main.calc"]).unwrap();
        match cli.cmd {
            CliSubCommand::Compile(Compile { output, file }) => {
                assert_eq!(output, Some(PathBuf::from("out.c")));
                assert_eq!(file, PathBuf::from("main.calc"));
            }
            other => panic!("parsed the wrong subcommand: {other:?}"),
        }

        assert!(Cli::from_args(&["descent"], &["tree"]).is_err());
    }
}
