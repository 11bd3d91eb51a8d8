// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core type definitions shared by every part of the engine.
//!
//! - **ID newtypes**: Type-safe wrappers around UUIDs for each entity the
//!   engine reasons about ([`UserId`], [`OrgId`], [`ProjectId`], ...)
//! - **Roles**: The closed [`Role`] enumeration used both as an actor's global
//!   role and as a role held inside a single organization
//!
//! All ID types implement transparent serde serialization (as UUID strings) and
//! provide conversion to/from [`uuid::Uuid`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::AuthError;

// =============================================================================
// ID Newtypes
// =============================================================================

macro_rules! define_id_type {
	($name:ident, $doc:expr) => {
		#[doc = $doc]
		#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
		#[serde(transparent)]
		pub struct $name(Uuid);

		impl $name {
			/// Create a new ID from a UUID.
			pub fn new(id: Uuid) -> Self {
				Self(id)
			}

			/// Generate a new random ID.
			pub fn generate() -> Self {
				Self(Uuid::new_v4())
			}

			/// Get the inner UUID value.
			pub fn into_inner(self) -> Uuid {
				self.0
			}
		}

		impl fmt::Display for $name {
			fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				write!(f, "{}", self.0)
			}
		}

		impl From<Uuid> for $name {
			fn from(id: Uuid) -> Self {
				Self(id)
			}
		}

		impl From<$name> for Uuid {
			fn from(id: $name) -> Self {
				id.0
			}
		}
	};
}

define_id_type!(UserId, "Unique identifier for a user.");
define_id_type!(OrgId, "Unique identifier for an organization (tenant).");
define_id_type!(ProjectId, "Unique identifier for a project.");
define_id_type!(MemberId, "Unique identifier for an organization membership.");
define_id_type!(InviteId, "Unique identifier for a pending invite.");

// =============================================================================
// Roles
// =============================================================================

/// Capability level assigned to a user, globally or inside one organization.
///
/// A user may hold a different role in every organization they belong to.
/// Each variant has exactly one policy definition; see [`crate::policies`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
	/// Manages everything inside their organization.
	Admin,
	/// Works on projects, owns what they create.
	Member,
	/// Member with access to the organization's billing.
	Billing,
}

impl Role {
	/// Returns all available roles.
	pub fn all() -> &'static [Role] {
		&[Role::Admin, Role::Member, Role::Billing]
	}

	/// Returns the wire name of the role.
	pub fn as_str(&self) -> &'static str {
		match self {
			Role::Admin => "ADMIN",
			Role::Member => "MEMBER",
			Role::Billing => "BILLING",
		}
	}
}

impl fmt::Display for Role {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Role {
	type Err = AuthError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Role::all()
			.iter()
			.copied()
			.find(|role| role.as_str().eq_ignore_ascii_case(s))
			.ok_or_else(|| AuthError::UnknownRole(s.to_string()))
	}
}
