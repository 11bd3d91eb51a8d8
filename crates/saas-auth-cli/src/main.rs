// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! `saas-auth`: query the authorization engine from the command line.
//!
//! Exit codes: 0 allowed, 1 denied, 2 configuration or usage error.

mod cli;
mod commands;
mod config;
mod logging;
mod output;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use crate::cli::{Args, Command};
use crate::config::OutputFormat;

const EXIT_DENIED: u8 = 1;
const EXIT_ERROR: u8 = 2;

fn main() -> ExitCode {
	let args = Args::parse();
	match run(args) {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:#}");
			ExitCode::from(EXIT_ERROR)
		}
	}
}

fn run(args: Args) -> anyhow::Result<ExitCode> {
	let config = config::load_config(args.config.clone()).context("failed to load configuration")?;
	logging::init(&config.logging)?;
	tracing::debug!(?config, "configuration loaded");

	let format = if args.json {
		OutputFormat::Json
	} else {
		config.output.format
	};

	match args.command {
		Command::Check(query) => {
			let report = commands::check(&query, config.output.explain)?;
			println!("{}", output::check(&report, format)?.trim_end());
			Ok(decision_code(report.allowed))
		}
		Command::Explain(query) => {
			let report = commands::check(&query, true)?;
			println!("{}", output::check(&report, format)?.trim_end());
			Ok(decision_code(report.allowed))
		}
		Command::Rules(rules) => {
			let report = commands::rules(&rules)?;
			println!("{}", output::rules(&report, format)?.trim_end());
			Ok(ExitCode::SUCCESS)
		}
		Command::Roles => {
			println!("{}", output::roles(commands::roles(), format)?.trim_end());
			Ok(ExitCode::SUCCESS)
		}
	}
}

fn decision_code(allowed: bool) -> ExitCode {
	if allowed {
		ExitCode::SUCCESS
	} else {
		ExitCode::from(EXIT_DENIED)
	}
}
