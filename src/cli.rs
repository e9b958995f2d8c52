use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "openfed-validate")]
#[command(version)]
#[command(about = "Pre-update validations for Openfed sites", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Arguments of the default `validate` command
    #[command(flatten)]
    pub validate: ValidateArgs,

    /// Debug logging
    #[arg(short = 'd', long, global = true)]
    pub debug: bool,

    /// drush executable, overrides the config file
    #[arg(long, global = true)]
    pub drush: Option<String>,

    /// Project root (where composer.openfed.json lives)
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// Config file (default: <root>/openfed-validations.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check that the site can be updated to Openfed 12 (default)
    Validate(ValidateArgs),

    /// Uninstall allowed_formats once its migration to core has run
    PostUpdate,
}

#[derive(Args, Debug, Default, Clone)]
pub struct ValidateArgs {
    /// Uninstall deprecated modules and themes instead of failing
    #[arg(long)]
    pub fix: bool,

    /// Script arguments as forwarded by Composer; `fix` enables fix-mode
    pub args: Vec<String>,
}

impl ValidateArgs {
    pub fn fix_mode(&self) -> bool {
        self.fix || self.args.iter().any(|a| a == "fix")
    }
}

impl Cli {
    /// Subcommand to run; `validate` when none is given. Top-level
    /// `--fix` and composer arguments also apply to an explicit `validate`.
    pub fn command(&self) -> Commands {
        match &self.command {
            Some(Commands::Validate(args)) => {
                let mut merged = self.validate.clone();
                merged.fix |= args.fix;
                merged.args.extend(args.args.iter().cloned());
                Commands::Validate(merged)
            }
            Some(Commands::PostUpdate) => Commands::PostUpdate,
            None => Commands::Validate(self.validate.clone()),
        }
    }

    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(|| crate::config::Config::default_path(&self.root))
    }
}
