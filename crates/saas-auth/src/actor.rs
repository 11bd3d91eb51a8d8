// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The actor side of a decision.
//!
//! [`ActorContext`] is supplied by the caller after authentication and the
//! caller's own membership lookup. It is read-only input: policy definitions
//! may branch on it and conditions compare subject attributes against it.

use serde::{Deserialize, Serialize};

use crate::types::{OrgId, Role, UserId};

/// The actor's role inside one organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantMembership {
	pub organization_id: OrgId,
	pub role: Role,
}

impl TenantMembership {
	pub fn new(organization_id: OrgId, role: Role) -> Self {
		Self {
			organization_id,
			role,
		}
	}
}

/// Everything the engine knows about who is asking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorContext {
	pub actor_id: UserId,
	/// Selects the policy definition.
	pub role: Role,
	/// Present for tenant-scoped checks; may carry a different role.
	#[serde(default)]
	pub tenant: Option<TenantMembership>,
}

impl ActorContext {
	/// Creates a context with no tenant membership.
	pub fn new(actor_id: UserId, role: Role) -> Self {
		Self {
			actor_id,
			role,
			tenant: None,
		}
	}

	/// Builder: set the tenant membership.
	pub fn with_tenant(mut self, organization_id: OrgId, role: Role) -> Self {
		self.tenant = Some(TenantMembership::new(organization_id, role));
		self
	}

	/// Returns the organization the actor is acting within, if any.
	pub fn tenant_org(&self) -> Option<OrgId> {
		self.tenant.map(|t| t.organization_id)
	}

	/// Returns the actor's role within their tenant, if any.
	pub fn tenant_role(&self) -> Option<Role> {
		self.tenant.map(|t| t.role)
	}

	/// Returns true if `user_id` is the actor.
	pub fn is(&self, user_id: UserId) -> bool {
		self.actor_id == user_id
	}
}
