// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use uuid::Uuid;

#[derive(Debug, Parser)]
#[command(name = "saas-auth", version, about = "Query the SaaS authorization engine")]
pub struct Args {
	/// Config file (defaults to $XDG_CONFIG_HOME/saas-auth/config.toml)
	#[arg(long, global = true, env = "SAAS_AUTH_CONFIG")]
	pub config: Option<PathBuf>,

	/// Print JSON regardless of the configured output format
	#[arg(long, global = true)]
	pub json: bool,

	#[command(subcommand)]
	pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
	/// Decide whether an actor may perform an action
	Check(QueryArgs),
	/// Like `check`, and print the deciding rule
	Explain(QueryArgs),
	/// Print the compiled rule list for a role
	Rules(RulesArgs),
	/// Print every role
	Roles,
}

#[derive(Debug, clap::Args)]
pub struct TenantArgs {
	/// Organization the request is scoped to
	#[arg(long, requires = "tenant_role")]
	pub tenant_org: Option<Uuid>,

	/// The actor's role within --tenant-org
	#[arg(long, requires = "tenant_org")]
	pub tenant_role: Option<String>,
}

#[derive(Debug, clap::Args)]
#[group(required = true, multiple = false)]
pub struct TargetArgs {
	/// Query a bare subject type, e.g. Project
	#[arg(long)]
	pub subject_type: Option<String>,

	/// Query a subject instance given as JSON with a __typename field
	#[arg(long)]
	pub subject: Option<String>,
}

#[derive(Debug, clap::Args)]
pub struct QueryArgs {
	#[arg(long)]
	pub actor: Uuid,

	#[arg(long)]
	pub role: String,

	#[command(flatten)]
	pub tenant: TenantArgs,

	#[arg(long)]
	pub action: String,

	#[command(flatten)]
	pub target: TargetArgs,
}

#[derive(Debug, clap::Args)]
pub struct RulesArgs {
	#[arg(long)]
	pub role: String,

	/// Defaults to the nil UUID
	#[arg(long)]
	pub actor: Option<Uuid>,

	#[command(flatten)]
	pub tenant: TenantArgs,
}

#[cfg(test)]
mod tests {
	use super::*;
	use clap::CommandFactory;

	const ACTOR: &str = "00000000-0000-0000-0000-00000000002a";

	#[test]
	fn command_definition_is_consistent() {
		Args::command().debug_assert();
	}

	#[test]
	fn parses_type_level_check() {
		let args = Args::try_parse_from([
			"saas-auth",
			"check",
			"--actor",
			ACTOR,
			"--role",
			"MEMBER",
			"--action",
			"invite",
			"--subject-type",
			"User",
		])
		.unwrap();

		match args.command {
			Command::Check(query) => {
				assert_eq!(query.actor, Uuid::from_u128(42));
				assert_eq!(query.target.subject_type.as_deref(), Some("User"));
				assert!(query.target.subject.is_none());
				assert!(query.tenant.tenant_org.is_none());
			}
			other => panic!("unexpected command: {other:?}"),
		}
	}

	#[test]
	fn requires_a_target() {
		let err = Args::try_parse_from([
			"saas-auth", "check", "--actor", ACTOR, "--role", "MEMBER", "--action", "get",
		])
		.unwrap_err();
		assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
	}

	#[test]
	fn rejects_both_targets() {
		let err = Args::try_parse_from([
			"saas-auth",
			"check",
			"--actor",
			ACTOR,
			"--role",
			"MEMBER",
			"--action",
			"get",
			"--subject-type",
			"User",
			"--subject",
			"{}",
		])
		.unwrap_err();
		assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
	}

	#[test]
	fn tenant_org_requires_tenant_role() {
		let err = Args::try_parse_from([
			"saas-auth",
			"rules",
			"--role",
			"ADMIN",
			"--tenant-org",
			ACTOR,
		])
		.unwrap_err();
		assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
	}

	#[test]
	fn rejects_malformed_actor_id() {
		assert!(Args::try_parse_from(["saas-auth", "rules", "--role", "ADMIN", "--actor", "42"]).is_err());
	}
}
