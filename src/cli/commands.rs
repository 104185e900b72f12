use std::io;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::generate;
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, Order, Settings};
use crate::general::{GeneralPosition, GeneralTree};
use crate::parenthetic::parse_parenthetic;
use crate::tree_traits::{Tree, TreeRender};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let settings = Settings::load(cli.config.as_deref())?;
    debug!("settings: {:?}", settings);

    match &cli.command {
        Some(Commands::Show {
            file,
            order,
            inline,
        }) => cmd_show(&settings, file, order.unwrap_or(settings.order), *inline),
        Some(Commands::Tree { file }) => cmd_tree(&settings, file),
        Some(Commands::Format { file }) => cmd_format(&settings, file),
        Some(Commands::Stats { file }) => cmd_stats(&settings, file),
        Some(Commands::Config { command }) => cmd_config(&settings, command),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => Err(CliError::Usage(
            "no command given, see --help".to_string(),
        )),
    }
}

/// Reads and parses a parenthetic tree file.
#[instrument(level = "debug", skip(settings))]
pub fn load_tree(settings: &Settings, path: &Path) -> CliResult<GeneralTree<String>> {
    let content = std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let text = if settings.trim_input {
        content.trim_end()
    } else {
        content.as_str()
    };
    parse_parenthetic(text).map_err(|source| CliError::Tree {
        path: path.to_path_buf(),
        source,
    })
}

/// Positions of `tree` in the requested order.
pub fn ordered_positions(
    tree: &GeneralTree<String>,
    order: Order,
) -> Box<dyn Iterator<Item = GeneralPosition> + '_> {
    match order {
        Order::Positions => Box::new(tree.positions()),
        Order::Preorder => Box::new(tree.preorder()),
        Order::Postorder => Box::new(tree.postorder()),
        Order::BreadthFirst => Box::new(tree.breadth_first()),
    }
}

#[instrument(level = "debug", skip(settings))]
fn cmd_show(settings: &Settings, file: &Path, order: Order, inline: bool) -> CliResult<()> {
    let tree = load_tree(settings, file)?;
    let mut labels = ordered_positions(&tree, order).filter_map(|p| tree.element(p).ok());
    if inline {
        output::info(&labels.join(" "));
    } else {
        for label in labels {
            output::info(label);
        }
    }
    Ok(())
}

#[instrument(level = "debug", skip(settings))]
fn cmd_tree(settings: &Settings, file: &Path) -> CliResult<()> {
    let tree = load_tree(settings, file)?;
    output::info(&tree.to_tree_string());
    Ok(())
}

#[instrument(level = "debug", skip(settings))]
fn cmd_format(settings: &Settings, file: &Path) -> CliResult<()> {
    let tree = load_tree(settings, file)?;
    output::info(&tree.parenthetic());
    Ok(())
}

#[instrument(level = "debug", skip(settings))]
fn cmd_stats(settings: &Settings, file: &Path) -> CliResult<()> {
    let tree = load_tree(settings, file)?;
    let height = tree.height().map_err(|source| CliError::Tree {
        path: file.to_path_buf(),
        source,
    })?;
    let leaves = tree
        .positions()
        .filter(|&p| tree.is_leaf(p).unwrap_or(false))
        .count();
    output::header(&file.display());
    output::stat("nodes", &tree.len());
    output::stat("leaves", &leaves);
    output::stat("height", &height);
    Ok(())
}

fn cmd_config(settings: &Settings, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => output::info(&settings.to_toml()?),
        ConfigCommands::Template => output::info(&Settings::template()),
        ConfigCommands::Path => match global_config_path() {
            Some(path) => output::info(&path.display()),
            None => {
                return Err(CliError::Usage(
                    "no home directory, global config location unknown".to_string(),
                ))
            }
        },
    }
    Ok(())
}
