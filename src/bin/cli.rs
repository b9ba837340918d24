// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Meshbool demo CLI

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use meshbool::geometry::analytics::analyze;
use meshbool::{BooleanOp, CsgConfig, Kernel, Primitive, Solid};
use nalgebra::Vector3;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "meshbool")]
#[command(about = "Boolean operations on closed triangle meshes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a boolean between a unit cube and a translated shape
    Demo {
        /// Operation: union, intersection or difference
        #[arg(short, long, default_value = "difference")]
        op: BooleanOp,

        /// Translation of the second shape, as x,y,z
        #[arg(long, default_value = "0.5,0.5,0.5", value_parser = parse_offset)]
        offset: Vector3<f64>,

        /// Second shape
        #[arg(short, long, value_enum, default_value_t = Shape::Cube)]
        shape: Shape,

        /// Print statistics as JSON
        #[arg(long)]
        json: bool,

        /// Configuration file (TOML)
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Print the effective configuration as TOML
    Config {
        /// Configuration file (TOML)
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Shape {
    Cube,
    Sphere,
    Cylinder,
}

impl Shape {
    fn to_solid(self) -> meshbool::Result<Solid> {
        match self {
            Self::Cube => Primitive::cube(Vector3::new(1.0, 1.0, 1.0), false),
            Self::Sphere => Primitive::sphere(0.5, 24),
            Self::Cylinder => Primitive::cylinder(1.0, 0.5, 24),
        }
        .to_solid()
    }
}

fn parse_offset(value: &str) -> Result<Vector3<f64>> {
    let parts = value
        .split(',')
        .map(|p| p.trim().parse::<f64>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .with_context(|| format!("invalid offset: {}", value))?;
    match parts.as_slice() {
        [x, y, z] => Ok(Vector3::new(*x, *y, *z)),
        _ => bail!("offset needs three components, got {}", parts.len()),
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<CsgConfig> {
    match path {
        Some(path) => CsgConfig::from_file(path),
        None => CsgConfig::load(),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Demo {
            op,
            offset,
            shape,
            json,
            config,
        } => {
            let config = load_config(config.as_ref())?;
            demo_command(*op, offset, *shape, *json, config, cli.verbose)?;
        }
        Commands::Config { config } => {
            let config = load_config(config.as_ref())?;
            print!("{}", toml::to_string_pretty(&config)?);
        }
        Commands::Version => {
            println!("Meshbool v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

fn demo_command(
    op: BooleanOp,
    offset: &Vector3<f64>,
    shape: Shape,
    json: bool,
    config: CsgConfig,
    verbose: bool,
) -> Result<()> {
    let kernel = Kernel::with_config(config)?;
    let first = Shape::Cube.to_solid()?;
    let mut second = shape.to_solid()?;
    second.translate(offset.x, offset.y, offset.z);

    if verbose && !json {
        println!(
            "{} cube {} {:?} at ({}, {}, {})",
            "ℹ".bright_blue(),
            op.to_string().bold(),
            shape,
            offset.x,
            offset.y,
            offset.z
        );
    }

    let start = std::time::Instant::now();
    let result = kernel
        .evaluate(&first, &second, op)
        .with_context(|| format!("{} failed", op))?;
    let elapsed = start.elapsed();
    let stats = analyze(&result);

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("{} {} in {:.2?}", "✓".green(), op.to_string().bold(), elapsed);
    stats.print();
    if !stats.is_watertight {
        println!(
            "{} result has open or T-junction edges",
            "note:".yellow()
        );
    }

    Ok(())
}
