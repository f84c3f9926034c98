//! CLI command implementations
//!
//! This module contains the implementation for each CLI command.

use crate::codec::{Codepoint, Symbol};
use crate::{Automaton, Config, Error, RegexCompiler, Result, cli::Cli};

/// Parse a comma-separated word such as `1,2,3`; an empty string is the
/// empty word.
pub fn parse_word(word: &str) -> Result<Vec<Symbol>> {
    word.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<Symbol>()
                .map_err(|e| Error::parser(format!("invalid symbol {:?} in {:?}: {}", s, word, e)))
        })
        .collect()
}

/// Compile `pattern` with the clamp and minimization settings of `config`,
/// command-line overrides first
fn compile_pattern(
    pattern: &str,
    min: Option<Codepoint>,
    max: Option<Codepoint>,
    minimize: bool,
    config: &Config,
) -> Result<Automaton> {
    let min = min.unwrap_or(config.automaton.min);
    let max = max.unwrap_or(config.automaton.max);
    crate::ensure!(
        min <= max,
        "Empty codepoint range [{}, {}] after command-line overrides",
        min,
        max
    );
    let compiler = RegexCompiler::new().with_minimize(minimize);
    let automaton = Automaton::compile(&compiler, pattern, min, max)?;
    tracing::info!(
        "Compiled {:?}: {} states, {} symbols",
        pattern,
        automaton.nb_states(),
        automaton.nb_symbols()
    );
    Ok(automaton)
}

/// Compile command implementation
pub mod compile {
    use super::*;
    use crate::cli::{Commands, OutputFormat};
    use anyhow::Context;

    /// Execute the compile command
    pub fn execute(args: Cli, config: Config) -> Result<()> {
        let (pattern, min, max, no_minimize, output_format, file) = match args.command {
            Commands::Compile {
                pattern,
                min,
                max,
                no_minimize,
                output,
                file,
            } => (pattern, min, max, no_minimize, output, file),
            _ => unreachable!("compile::execute called with wrong command"),
        };

        let minimize = config.automaton.minimize && !no_minimize;
        let automaton = compile_pattern(&pattern, min, max, minimize, &config)?;

        let mut stdout = std::io::stdout();
        match output_format {
            OutputFormat::Json => {
                crate::cli::output::output_json(&mut stdout, &pattern, &automaton)?;
            }
            OutputFormat::Table => {
                crate::cli::output::output_table(&mut stdout, &pattern, &automaton)?;
            }
            OutputFormat::Dot => match file {
                Some(path) => automaton
                    .write_dot(&path, &config.export.rankdir)
                    .with_context(|| format!("Failed to export automaton to {:?}", path))?,
                None => {
                    crate::cli::output::output_dot(&mut stdout, &automaton, &config.export.rankdir)?
                }
            },
        }

        Ok(())
    }
}

/// Run command implementation
pub mod run {
    use super::*;
    use crate::cli::Commands;

    /// Execute the run command
    pub fn execute(args: Cli, config: Config) -> Result<()> {
        let (pattern, words, min, max) = match args.command {
            Commands::Run {
                pattern,
                word,
                min,
                max,
            } => (pattern, word, min, max),
            _ => unreachable!("run::execute called with wrong command"),
        };

        let automaton = compile_pattern(&pattern, min, max, config.automaton.minimize, &config)?;

        for raw in &words {
            let word = parse_word(raw)?;
            let verdict = if automaton.run(&word)? {
                "accepted"
            } else {
                "rejected"
            };
            println!("[{}] {}", raw, verdict);
        }

        Ok(())
    }
}

/// Symbol command implementation
pub mod symbol {
    use super::*;
    use crate::codec;

    /// Execute the symbol command
    pub fn execute(value: i64, reverse: bool) -> Result<()> {
        if reverse {
            let codepoint = Codepoint::try_from(value).map_err(|_| Error::UnknownSymbol(value))?;
            let symbol = codec::to_external(codepoint)?;
            println!("codepoint {:#06x} -> symbol {}", codepoint, symbol);
        } else {
            let symbol = Symbol::try_from(value).map_err(|_| Error::UnknownSymbol(value))?;
            let codepoint = codec::to_internal(symbol)?;
            println!("symbol {} -> codepoint {:#06x}", symbol, codepoint);
        }
        Ok(())
    }
}
