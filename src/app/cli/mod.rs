//! CLI adapter.

mod logging;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::app::api::{
    self, JobDetail, JobSummary, ResolveOptions, RunOptions, ScriptOptions, ValidationReport,
};
use crate::app::config::LoadOptions;
use crate::domain::AppError;

pub use logging::{LOG_ENV, init_logging, select_filter};

#[derive(Parser)]
#[command(name = "stormjob")]
#[command(version)]
#[command(
    about = "Resolve and run parameterized batch-array jobs on the lab's clusters",
    long_about = None
)]
struct Cli {
    /// Configuration file (default: $STORMJOB_CONFIG)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Extra directory of job definitions
    #[arg(long, global = true, value_name = "DIR")]
    jobs_dir: Option<PathBuf>,
    /// Log filter, e.g. `info` or `stormjob=debug` (default: $STORMJOB_LOG)
    #[arg(long, global = true, value_name = "FILTER")]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args, Debug, Clone)]
struct TaskArgs {
    /// Job name
    job: String,
    /// Host name to classify (default: this machine)
    #[arg(long)]
    host: Option<String>,
    /// Array index (default: $SLURM_ARRAY_TASK_ID)
    #[arg(short, long)]
    index: Option<usize>,
    /// Fail when the host matches no cluster
    #[arg(long)]
    strict_host: bool,
}

impl From<TaskArgs> for ResolveOptions {
    fn from(args: TaskArgs) -> Self {
        ResolveOptions {
            job: args.job,
            host: args.host,
            index: args.index,
            strict_host: args.strict_host,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List known jobs
    #[clap(visible_alias = "ls")]
    List {
        #[arg(long)]
        json: bool,
    },
    /// Show a job's directives and parameter table
    Show {
        job: String,
        #[arg(long)]
        json: bool,
    },
    /// Print the invocation for one array task
    Resolve {
        #[command(flatten)]
        task: TaskArgs,
        #[arg(long)]
        json: bool,
    },
    /// Resolve one array task and execute it
    #[clap(visible_alias = "r")]
    Run {
        #[command(flatten)]
        task: TaskArgs,
        /// Print the command instead of executing it
        #[arg(long)]
        dry_run: bool,
    },
    /// Render a SLURM batch script for a job array
    Script {
        job: String,
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Overwrite an existing output file
        #[arg(short, long)]
        force: bool,
    },
    /// Resolve every task of every job on every cluster
    Validate {
        #[arg(long)]
        json: bool,
    },
}

/// Entry point for the CLI.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn execute(cli: Cli) -> Result<i32, AppError> {
    let options = LoadOptions { config_path: cli.config, jobs_dir: cli.jobs_dir };
    let settings = api::load_settings(&options)?;

    let env_filter = std::env::var(LOG_ENV).ok();
    init_logging(&select_filter(
        cli.log_level.as_deref(),
        env_filter.as_deref(),
        settings.config.log_level.as_deref(),
    ))?;

    let ctx = api::load_context(settings)?;

    match cli.command {
        Commands::List { json } => {
            let jobs = crate::app::commands::list::execute(&ctx);
            if json { print_json(&jobs)? } else { print_list(&jobs) }
            Ok(0)
        }
        Commands::Show { job, json } => {
            let detail = crate::app::commands::show::execute(&ctx, &job)?;
            if json { print_json(&detail)? } else { print_detail(&detail) }
            Ok(0)
        }
        Commands::Resolve { task, json } => {
            let invocation = crate::app::commands::resolve::execute(&ctx, &task.into())?;
            if json { print_json(&invocation)? } else { println!("{}", invocation.shell_line()) }
            Ok(0)
        }
        Commands::Run { task, dry_run } => {
            let options = RunOptions { resolve: task.into(), dry_run };
            let result = crate::app::commands::run::execute(&ctx, &options)?;
            match result.exit_code {
                None => {
                    println!("{}", result.invocation.shell_line());
                    Ok(0)
                }
                Some(code) => Ok(code),
            }
        }
        Commands::Script { job, output, force } => {
            let outcome =
                crate::app::commands::script::execute(&ctx, &ScriptOptions { job, output, force })?;
            match outcome.written {
                Some(path) => println!("✅ Wrote batch script to {}", path.display()),
                None => print!("{}", outcome.content),
            }
            Ok(0)
        }
        Commands::Validate { json } => {
            let report = crate::app::commands::validate::execute(&ctx);
            if json { print_json(&report)? } else { print_report(&report) }
            Ok(report.exit_code())
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_list(jobs: &[JobSummary]) {
    if jobs.is_empty() {
        println!("No jobs defined.");
        return;
    }
    let width = jobs.iter().map(|job| job.name.len()).max().unwrap_or(0);
    for job in jobs {
        println!("{:<width$}  {:<12}  {}", job.name, job.array, job.description);
    }
}

fn print_detail(detail: &JobDetail) {
    println!("{}", detail.name);
    if !detail.description.is_empty() {
        println!("  {}", detail.description);
    }
    println!();
    println!("program:   {}", detail.program.display());
    println!("array:     {} ({:?})", detail.array, detail.mode);

    let scheduler = &detail.scheduler;
    println!("memory:    {}", scheduler.memory);
    println!("tasks:     {}", scheduler.tasks);
    println!("wall time: {}", scheduler.wall_time);
    if let Some(partition) = &scheduler.partition {
        println!("partition: {}", partition);
    }
    if let Some(mail_type) = &scheduler.mail_type {
        println!("mail:      {}", mail_type);
    }

    println!();
    println!("Entries:");
    for entry in &detail.entries {
        let fields: Vec<String> = [
            entry.record.subset.as_ref().map(|v| format!("subset={v}")),
            entry.record.layer.as_ref().map(|v| format!("layer={v}")),
            entry.record.layer_label.as_ref().map(|v| format!("layer_label={v}")),
        ]
        .into_iter()
        .flatten()
        .collect();
        println!("  {:>3}  {}", entry.index, fields.join(" "));
    }

    println!();
    println!("Arguments:");
    for arg in &detail.args {
        println!("  --{}={}", arg.name, arg.value);
    }
}

fn print_report(report: &ValidationReport) {
    for failure in &report.failures {
        println!("❌ {} [{} #{}]: {}", failure.job, failure.cluster, failure.index, failure.message);
    }
    if report.is_ok() {
        println!("✅ {} jobs valid ({} tasks resolved)", report.jobs, report.checked);
    } else {
        println!(
            "{} of {} tasks failed across {} jobs",
            report.failures.len(),
            report.checked,
            report.jobs
        );
    }
}
