//! Merge command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};

use super::utils::parse_override;
use crate::config::load_settings;
use anyconf::load::glob;
use anyconf::utils::has_glob_meta;
use anyconf::{merge_trees, Dumper, Loader, MergeStrategy, PathSpec};

const DEFAULT_OUTPUT_TYPE: &str = "json";

#[derive(Args)]
pub struct MergeArgs {
    /// Input files or glob patterns, merged in the order given
    #[arg(value_name = "INPUTS", required = true)]
    pub inputs: Vec<String>,

    /// Parse every input as this type instead of going by extension
    #[arg(short = 'I', long = "itype", value_name = "TYPE")]
    pub input_type: Option<String>,

    /// Output type (defaults to the output file's extension, or JSON on stdout)
    #[arg(short = 'O', long = "otype", value_name = "TYPE")]
    pub output_type: Option<String>,

    /// Merge strategy: replace, merge_dicts or merge_dicts_and_lists
    #[arg(short = 'M', long = "merge", value_name = "STRATEGY")]
    pub merge: Option<String>,

    /// Write the result to this file instead of stdout
    #[arg(short = 'o', long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Override a value after merging (KEY=VALUE, dotted keys nest; repeatable)
    #[arg(short = 's', long = "set", value_name = "KEY=VALUE")]
    pub set: Vec<String>,

    /// Parse inputs in parallel (merge order is unchanged)
    #[arg(long)]
    pub parallel: bool,

    /// Path to settings file (anyconf.toml or .anyconf.yml)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

pub fn run(args: MergeArgs) -> Result<()> {
    // Validate the strategy before touching any input.
    let cli_strategy = args.merge.as_deref().map(str::parse::<MergeStrategy>).transpose()?;

    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    let settings = load_settings(&cwd, args.config.as_deref())?;

    let strategy = cli_strategy.unwrap_or(settings.merge);
    let input_type = args.input_type.or(settings.input_type);
    let output_type = args.output_type.or(settings.output_type);

    let overrides = args.set.iter().map(|s| parse_override(s)).collect::<Result<Vec<_>>>()?;

    let loader = Loader::new()
        .forced_type(input_type.as_deref())
        .strategy(strategy)
        .parallel(args.parallel || settings.parallel);

    let mut tree = match args.inputs.as_slice() {
        [single] => loader.load(single.as_str()),
        many => loader.load_many(&PathSpec::List(expand_inputs(many)?)),
    }
    .context("Failed to load configuration")?;

    for extra in overrides {
        tree = merge_trees(tree, extra, strategy);
    }

    let dumper = Dumper::new();
    match args.output {
        Some(path) => dumper
            .dump(&tree, &path, output_type.as_deref())
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => {
            let text = dumper.dumps(&tree, output_type.as_deref().unwrap_or(DEFAULT_OUTPUT_TYPE))?;
            print!("{}", text);
        }
    }
    Ok(())
}

/// Each argument is a file, or a pattern expanded in place.
fn expand_inputs(inputs: &[String]) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for input in inputs {
        if has_glob_meta(input) && !Path::new(input).exists() {
            paths.extend(glob::expand(input)?);
        } else {
            paths.push(PathBuf::from(input));
        }
    }
    Ok(paths)
}
