use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "preflight",
    version,
    about = "Configuration-driven pre-commit action runner"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output machine-readable JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Color mode
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorMode,

    /// Path to preflight.yaml (overrides auto-discovery)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run configured actions against changed files
    Run {
        /// Git hook to run as (selects the changed-file set)
        #[arg(long, value_enum)]
        hook: Option<HookArg>,

        /// Run against every file in the project
        #[arg(long, conflicts_with = "hook")]
        all_files: bool,

        /// Run independent actions concurrently
        #[arg(long)]
        parallel: bool,

        /// Explicit files to run against (bypasses git discovery)
        #[arg(conflicts_with_all = ["hook", "all_files"])]
        files: Vec<String>,
    },

    /// Validate the configuration without running any action
    Check,

    /// List configured actions
    List,

    /// Install git hooks that invoke preflight
    Install {
        /// Overwrite hooks installed by other tools
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum HookArg {
    PreCommit,
    PrePush,
}

impl From<HookArg> for preflight_core::hooks::HookKind {
    fn from(arg: HookArg) -> Self {
        match arg {
            HookArg::PreCommit => Self::PreCommit,
            HookArg::PrePush => Self::PrePush,
        }
    }
}
