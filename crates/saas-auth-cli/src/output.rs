// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::fmt::Write;

use saas_auth::Role;
use serde::Serialize;

use crate::commands::{CheckReport, RuleReport, RulesReport};
use crate::config::OutputFormat;

fn json<T: Serialize>(value: &T) -> anyhow::Result<String> {
	Ok(serde_json::to_string_pretty(value)?)
}

fn rule_line(rule: &RuleReport) -> String {
	format!("#{:<2} {}", rule.index, rule.rule)
}

pub fn check(report: &CheckReport, format: OutputFormat) -> anyhow::Result<String> {
	if format == OutputFormat::Json {
		return json(report);
	}

	let mut out = String::new();
	writeln!(
		out,
		"{}: {} {} {} {}",
		if report.allowed { "allowed" } else { "denied" },
		report.role,
		report.actor_id,
		report.action,
		report.subject_type
	)?;
	match &report.decided_by {
		Some(Some(rule)) => writeln!(out, "  decided by {}", rule_line(rule))?,
		Some(None) => writeln!(out, "  no matching rule (default deny)")?,
		None => {}
	}
	Ok(out)
}

pub fn rules(report: &RulesReport, format: OutputFormat) -> anyhow::Result<String> {
	if format == OutputFormat::Json {
		return json(report);
	}

	let mut out = String::new();
	writeln!(out, "{} rules for {}", report.role, report.actor_id)?;
	for rule in &report.rules {
		writeln!(out, "  {}", rule_line(rule))?;
	}
	Ok(out)
}

pub fn roles(roles: &[Role], format: OutputFormat) -> anyhow::Result<String> {
	if format == OutputFormat::Json {
		return json(&roles);
	}

	let mut out = String::new();
	for role in roles {
		writeln!(out, "{role}")?;
	}
	Ok(out)
}
