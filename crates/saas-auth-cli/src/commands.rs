// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Subcommand implementations. Each returns a report; rendering lives in
//! [`crate::output`].

use saas_auth::{
	resolve_named, Ability, Action, AuthError, Decision, Effect, OrgId, Role, Subject,
	SubjectRef, SubjectType, TenantMembership, UserId,
};
use serde::Serialize;
use uuid::Uuid;

use crate::cli::{QueryArgs, RulesArgs, TargetArgs, TenantArgs};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleReport {
	pub index: usize,
	pub effect: Effect,
	pub rule: String,
	pub reason: Option<String>,
}

impl From<Decision<'_>> for RuleReport {
	fn from(decision: Decision<'_>) -> Self {
		Self {
			index: decision.index,
			effect: decision.rule.effect,
			rule: decision.rule.to_string(),
			reason: decision.rule.reason.clone(),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckReport {
	pub actor_id: UserId,
	pub role: Role,
	pub action: Action,
	pub subject_type: SubjectType,
	pub allowed: bool,
	/// Set when the query was explained; `None` inside means the default deny.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub decided_by: Option<Option<RuleReport>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RulesReport {
	pub actor_id: UserId,
	pub role: Role,
	pub rules: Vec<RuleReport>,
}

enum Target {
	Instance(Subject),
	Type(SubjectType),
}

impl Target {
	fn parse(args: &TargetArgs) -> Result<Self, AuthError> {
		match (&args.subject, &args.subject_type) {
			(Some(json), _) => Subject::from_json_str(json).map(Target::Instance),
			(None, Some(name)) => name.parse().map(Target::Type),
			(None, None) => Err(AuthError::invalid_subject(
				"either --subject or --subject-type is required",
			)),
		}
	}

	fn as_ref(&self) -> SubjectRef<'_> {
		match self {
			Target::Instance(subject) => SubjectRef::Instance(subject),
			Target::Type(ty) => SubjectRef::Type(*ty),
		}
	}
}

fn tenant(args: &TenantArgs) -> Result<Option<TenantMembership>, AuthError> {
	match (&args.tenant_org, &args.tenant_role) {
		(Some(org), Some(role)) => Ok(Some(TenantMembership::new(
			OrgId::new(*org),
			role.parse()?,
		))),
		_ => Ok(None),
	}
}

fn ability(actor: Uuid, role: &str, tenant_args: &TenantArgs) -> Result<Ability, AuthError> {
	resolve_named(UserId::new(actor), role, tenant(tenant_args)?)
}

/// Runs a query. With `explain` the report names the deciding rule.
pub fn check(args: &QueryArgs, explain: bool) -> Result<CheckReport, AuthError> {
	let ability = ability(args.actor, &args.role, &args.tenant)?;
	let action: Action = args.action.parse()?;
	let target = Target::parse(&args.target)?;
	let target = target.as_ref();

	Ok(CheckReport {
		actor_id: ability.actor().actor_id,
		role: ability.actor().role,
		action,
		subject_type: target.subject_type(),
		allowed: ability.can(action, target),
		decided_by: explain.then(|| ability.relevant_rule(action, target).map(RuleReport::from)),
	})
}

pub fn rules(args: &RulesArgs) -> Result<RulesReport, AuthError> {
	let ability = ability(args.actor.unwrap_or(Uuid::nil()), &args.role, &args.tenant)?;
	let rules = ability
		.rules()
		.iter()
		.enumerate()
		.map(|(index, rule)| RuleReport::from(Decision { index, rule }))
		.collect();

	Ok(RulesReport {
		actor_id: ability.actor().actor_id,
		role: ability.actor().role,
		rules,
	})
}

pub fn roles() -> &'static [Role] {
	Role::all()
}
