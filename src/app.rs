//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and initialises logging
//! - parses CLI arguments into config structs
//! - runs the diff / fit / synth pipelines
//! - prints reports and writes optional exports

use std::fs::create_dir_all;

use clap::Parser;

use crate::cli::{Command, DiffArgs, FitArgs, SynthArgs};
use crate::domain::{DiffConfig, DiffReport, Domain, FitConfig, FitReport, StencilKind, SynthConfig};
use crate::error::AppError;
use crate::io::{TOOL_NAME, generated_at, grid_file_name, write_grid_text, write_json_report};
use crate::report::{format_diff_summary, format_fit_summary, largest_residuals};

pub mod pipeline;

/// Entry point for the `sfit` binary.
pub fn run() -> Result<(), AppError> {
    // `.env` may carry SFIT_DATA / RUST_LOG; a missing file is fine.
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = crate::cli::Cli::parse();
    match cli.command {
        Command::Diff(args) => handle_diff(&args),
        Command::Fit(args) => handle_fit(&args),
        Command::Synth(args) => handle_synth(&args),
    }
}

fn handle_diff(args: &DiffArgs) -> Result<(), AppError> {
    let config = diff_config_from_args(args);
    let run = pipeline::run_diff(&config)?;

    println!("{}", format_diff_summary(&config, run.values.len(), &run.scores));

    if let Some(dir) = &config.export_grids {
        create_dir_all(dir).map_err(|e| {
            AppError::new(2, format!("Failed to create export dir '{}': {e}", dir.display()))
        })?;
        write_grid_text(&grid_file_name(dir, config.function, None), &run.values)?;
        if let Some(derivative) = config.function.derivative() {
            write_grid_text(&grid_file_name(dir, derivative, None), &run.reference)?;
        }
        for (kind, estimate) in &run.estimates {
            write_grid_text(&grid_file_name(dir, config.function, Some(*kind)), estimate)?;
        }
        log::info!("wrote grids to {}", dir.display());
    }

    if let Some(path) = &config.export_json {
        let report = DiffReport {
            tool: TOOL_NAME.to_string(),
            generated_at: generated_at(),
            function: config.function,
            domain: config.domain,
            step: config.step,
            sinc_policy: config.sinc_policy,
            samples: run.values.len(),
            scores: run.scores.clone(),
        };
        write_json_report(path, &report)?;
    }

    Ok(())
}

fn handle_fit(args: &FitArgs) -> Result<(), AppError> {
    let config = fit_config_from_args(args);
    let run = pipeline::run_fit(&config)?;

    let largest = largest_residuals(&run.residuals, config.top);
    println!("{}", format_fit_summary(&config, &run.dataset, &run.outcome, &largest));

    if let Some(path) = &config.export_json {
        let report = FitReport {
            tool: TOOL_NAME.to_string(),
            generated_at: generated_at(),
            data_path: config.data_path.clone(),
            model: config.model,
            initial: config.initial.clone(),
            max_iterations: config.max_iterations,
            h: config.h,
            tolerance: config.tolerance,
            x_mode: config.x_mode,
            rows_used: run.dataset.rows_used,
            rows_skipped: run.dataset.row_errors.len(),
            outcome: run.outcome.clone(),
        };
        write_json_report(path, &report)?;
    }

    Ok(())
}

fn handle_synth(args: &SynthArgs) -> Result<(), AppError> {
    let config = synth_config_from_args(args);
    let grid = crate::data::generate_dataset(&config)?;
    write_grid_text(&config.out, &grid)?;
    log::info!("wrote {} samples to {}", grid.len(), config.out.display());
    Ok(())
}

pub fn diff_config_from_args(args: &DiffArgs) -> DiffConfig {
    let stencils = if args.stencils.is_empty() {
        StencilKind::ALL.to_vec()
    } else {
        args.stencils.clone()
    };
    DiffConfig {
        function: args.function,
        domain: Domain::new(args.start, args.end),
        step: args.step,
        sinc_policy: args.sinc_at_zero,
        stencils,
        export_grids: args.export_grids.clone(),
        export_json: args.export_json.clone(),
    }
}

pub fn fit_config_from_args(args: &FitArgs) -> FitConfig {
    let initial = if args.init.is_empty() {
        args.model.default_initial()
    } else {
        args.init.clone()
    };
    FitConfig {
        data_path: args.data.clone(),
        model: args.model,
        initial,
        max_iterations: args.iterations,
        h: args.h,
        tolerance: args.tolerance,
        lambda: args.lambda,
        x_mode: args.x_mode,
        strict: args.strict,
        top: args.top,
        export_json: args.export_json.clone(),
    }
}

pub fn synth_config_from_args(args: &SynthArgs) -> SynthConfig {
    let params = if args.params.is_empty() {
        args.model.default_initial()
    } else {
        args.params.clone()
    };
    SynthConfig {
        model: args.model,
        params,
        domain: Domain::new(args.start, args.end),
        step: args.step,
        noise: args.noise,
        seed: args.seed,
        out: args.out.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use crate::domain::ModelKind;

    #[test]
    fn diff_defaults_to_all_stencils() {
        let cli = Cli::parse_from(["sfit", "diff"]);
        let Command::Diff(args) = cli.command else {
            panic!("expected diff");
        };
        let config = diff_config_from_args(&args);
        assert_eq!(config.stencils, StencilKind::ALL.to_vec());
        assert_eq!(config.domain, Domain::new(-100.0, 100.0));
        assert_eq!(config.step, 0.1);
    }

    #[test]
    fn fit_falls_back_to_model_defaults() {
        let cli = Cli::parse_from(["sfit", "fit", "--data", "d.txt", "--model", "parabola"]);
        let Command::Fit(args) = cli.command else {
            panic!("expected fit");
        };
        let config = fit_config_from_args(&args);
        assert_eq!(config.initial, ModelKind::Parabola.default_initial());
        assert_eq!(config.tolerance, 1e-100);
    }
}
