//! cylwrap CLI - wrap sketch curves around a cylinder
//!
//! Reads a wrap job exported from the modeling session, runs the wrap, and
//! writes the plan of modeling operations that builds the result.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use cylwrap::cylwrap_ir::WrapJob;
use cylwrap::cylwrap_sketch::{bounds_of, WrapParameters};
use cylwrap::{HostOp, RecordingHost, WrapCommand};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "cylwrap")]
#[command(about = "Wrap planar sketch curves around a cylindrical face", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Wrap the curves of a job and write the resulting modeling plan
    Wrap {
        /// Input job file (.json)
        job: PathBuf,
        /// Output plan file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[command(flatten)]
        params: ParamArgs,
    },
    /// Display information about a job file
    Info {
        /// Input job file (.json)
        job: PathBuf,
    },
}

#[derive(Args, Debug, Default)]
struct ParamArgs {
    /// Parameter file (.toml), replacing the job's parameters
    #[arg(long)]
    config: Option<PathBuf>,
    /// Start from the plain variant: no offset, chord lines, direct face split
    #[arg(long)]
    simple: bool,
    /// Horizontal scale
    #[arg(long)]
    x_scale: Option<f64>,
    /// Vertical scale
    #[arg(long)]
    y_scale: Option<f64>,
    /// Radial offset added to the cylinder radius
    #[arg(long, allow_negative_numbers = true)]
    radius_offset: Option<f64>,
    /// Thickness of bodies grown from closed outlines
    #[arg(long, allow_negative_numbers = true)]
    thicken_depth: Option<f64>,
    /// Cut the cylinder face with wrapped closed splines (bare flag means true)
    #[arg(long, value_name = "BOOL", num_args = 0..=1, default_missing_value = "true")]
    split_face: Option<bool>,
}

/// The plan written by `cylwrap wrap`.
#[derive(Debug, Serialize)]
struct WrapPlan {
    params: WrapParameters,
    operations: Vec<HostOp>,
    skipped: Vec<SkippedCurve>,
    total_length: f64,
}

#[derive(Debug, Serialize)]
struct SkippedCurve {
    index: usize,
    kind: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cylwrap=info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Wrap {
            job,
            output,
            params,
        } => {
            wrap_job(&job, output.as_deref(), &params)?;
        }
        Commands::Info { job } => {
            show_info(&job)?;
        }
    }

    Ok(())
}

fn read_job(path: &Path) -> Result<WrapJob> {
    let json = fs::read_to_string(path)?;
    Ok(WrapJob::from_json(&json)?)
}

/// Resolve the parameters to run with: job, then config file or `--simple`,
/// then individual flags. Flag values are held to the interactive ranges.
fn resolve_params(job: &WrapParameters, args: &ParamArgs) -> Result<WrapParameters> {
    if args.config.is_some() && args.simple {
        anyhow::bail!("--config and --simple cannot be combined");
    }
    let mut params = match &args.config {
        Some(path) => WrapParameters::from_toml(&fs::read_to_string(path)?)?,
        None if args.simple => WrapParameters::simple(),
        None => job.clone(),
    };

    let mut overridden = false;
    for (flag, value) in [
        (&mut params.x_scale, args.x_scale),
        (&mut params.y_scale, args.y_scale),
        (&mut params.radius_offset, args.radius_offset),
        (&mut params.thicken_depth, args.thicken_depth),
    ] {
        if let Some(v) = value {
            *flag = v;
            overridden = true;
        }
    }
    if let Some(split) = args.split_face {
        params.split_face = split;
    }

    if overridden {
        let clamped = params.clamped();
        if clamped != params {
            warn!("parameters clamped to their input ranges");
        }
        params = clamped;
    }
    Ok(params)
}

fn wrap_job(path: &Path, output: Option<&Path>, args: &ParamArgs) -> Result<()> {
    let job = read_job(path)?;
    let params = resolve_params(&job.params, args)?;
    let command = WrapCommand::from_job(&job).with_params(params.clone());

    let mut host = RecordingHost::new();
    let result = command.execute(&mut host)?;

    let plan = WrapPlan {
        params,
        skipped: result
            .report
            .skipped()
            .map(|(index, kind)| SkippedCurve {
                index,
                kind: kind.to_string(),
            })
            .collect(),
        total_length: result.report.total_length(),
        operations: host.into_ops(),
    };
    let json = serde_json::to_string_pretty(&plan)?;

    match output {
        Some(out) => {
            fs::write(out, json)?;
            info!(path = %out.display(), operations = plan.operations.len(), "wrote plan");
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn show_info(path: &Path) -> Result<()> {
    let job = read_job(path)?;

    println!("cylwrap job: {}", path.display());
    println!("  Version: {}", job.version);

    match &job.cylinder {
        Some(face) => {
            let o = face.origin;
            let a = face.axis;
            println!("  Cylinder origin: ({}, {}, {})", o.x, o.y, o.z);
            println!("  Cylinder radius: {}", face.radius);
            println!("  Cylinder axis: ({}, {}, {})", a.x, a.y, a.z);
        }
        None => println!("  Cylinder: none selected"),
    }

    println!("  Entities: {}", job.entities.len());
    let curves = job.source_curves();
    for (i, (entity, curve)) in job.entities.iter().zip(&curves).enumerate() {
        let note = if curve.is_supported() { "" } else { " (unsupported)" };
        println!("    {}: {}{}", i, entity.type_name(), note);
    }

    match bounds_of(&curves) {
        Some(bb) => {
            println!(
                "  Bounds: ({}, {}) - ({}, {})",
                bb.min.x, bb.min.y, bb.max.x, bb.max.y
            );
            println!("  Size: {} x {}", bb.width(), bb.height());
        }
        None => println!("  Bounds: empty"),
    }

    let p = &job.params;
    println!(
        "  Params: x_scale={} y_scale={} radius_offset={} split_face={} thicken_depth={}",
        p.x_scale, p.y_scale, p.radius_offset, p.split_face, p.thicken_depth
    );

    Ok(())
}
