// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The permission resolver: the entry point route handlers use.
//!
//! Every call builds a fresh [`Ability`] from the actor's context. Nothing is
//! cached and nothing is read from storage, so an ability can never be stale
//! or leak between requests.

use tracing::instrument;

use crate::ability::{Ability, AbilityBuilder};
use crate::actor::{ActorContext, TenantMembership};
use crate::error::AuthError;
use crate::policies;
use crate::types::{Role, UserId};

/// Builds the ability for an actor.
///
/// `role` selects the policy definition. `tenant` carries the organization
/// the request is scoped to and the actor's role there; tenant-scoped
/// conditions are false without it.
pub fn resolve(
	actor_id: UserId,
	role: Role,
	tenant: Option<TenantMembership>,
) -> Result<Ability, AuthError> {
	resolve_context(ActorContext {
		actor_id,
		role,
		tenant,
	})
}

/// Like [`resolve`], with the role given by its wire name.
///
/// An unknown role fails before any rule is declared.
pub fn resolve_named(
	actor_id: UserId,
	role: &str,
	tenant: Option<TenantMembership>,
) -> Result<Ability, AuthError> {
	let role: Role = role.parse()?;
	resolve(actor_id, role, tenant)
}

#[instrument(
	level = "debug",
	skip(actor),
	fields(
		actor_id = %actor.actor_id,
		role = %actor.role,
		tenant = ?actor.tenant_org(),
	)
)]
pub fn resolve_context(actor: ActorContext) -> Result<Ability, AuthError> {
	let mut builder = AbilityBuilder::new(actor);
	policies::define(actor.role, &mut builder);

	let ability = builder.build().inspect_err(|e| {
		tracing::error!(error = %e, "policy definition rejected");
	})?;

	tracing::debug!(rules = ability.rules().len(), "resolved ability");
	Ok(ability)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::catalog::{Action, SubjectType};
	use crate::subject::Subject;
	use crate::types::{OrgId, ProjectId};
	use proptest::prelude::*;
	use uuid::Uuid;

	fn uid(n: u128) -> UserId {
		UserId::new(Uuid::from_u128(n))
	}

	#[test]
	fn every_role_resolves() {
		for role in Role::all() {
			let ability = resolve(UserId::generate(), *role, None).unwrap();
			assert!(!ability.rules().is_empty(), "{role} has no rules");
			assert_eq!(ability.actor().role, *role);
		}
	}

	#[test]
	fn every_role_resolves_with_tenant() {
		let tenant = TenantMembership::new(OrgId::generate(), Role::Member);
		for role in Role::all() {
			assert!(resolve(UserId::generate(), *role, Some(tenant)).is_ok());
		}
	}

	#[test]
	fn unknown_role_name_is_a_configuration_error() {
		let err = resolve_named(UserId::generate(), "SUPERUSER", None).unwrap_err();
		assert_eq!(err, AuthError::UnknownRole("SUPERUSER".to_string()));
	}

	#[test]
	fn known_role_name_resolves() {
		let ability = resolve_named(uid(42), "MEMBER", None).unwrap();
		assert!(ability.can(Action::Invite, SubjectType::User));
	}

	#[test]
	fn each_call_builds_a_fresh_ability() {
		let first = resolve(uid(1), Role::Member, None).unwrap();
		let second = resolve(uid(2), Role::Member, None).unwrap();
		let project = Subject::project(ProjectId::generate(), uid(1), OrgId::generate());

		assert!(first.can(Action::Delete, &project));
		assert!(!second.can(Action::Delete, &project));
	}

	proptest! {
			#[test]
			fn resolution_is_deterministic(actor in any::<u128>(), role_idx in 0usize..3) {
					let role = Role::all()[role_idx];
					let a = resolve(uid(actor), role, None).unwrap();
					let b = resolve(uid(actor), role, None).unwrap();
					prop_assert_eq!(a, b);
			}
	}
}
