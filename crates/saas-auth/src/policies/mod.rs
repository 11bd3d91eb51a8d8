// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Per-role policy definitions.
//!
//! Each role has exactly one definition: a pure function that appends rules to
//! an [`AbilityBuilder`]. Dispatch is an exhaustive match, so a role without a
//! definition does not compile. Composition is an explicit call to the
//! narrower definition before appending more rules.

pub mod admin;
pub mod billing;
pub mod member;

use crate::ability::AbilityBuilder;
use crate::types::Role;

/// Appends the rules for `role` to the builder.
pub fn define(role: Role, builder: &mut AbilityBuilder) {
	match role {
		Role::Admin => admin::define(builder),
		Role::Member => member::define(builder),
		Role::Billing => billing::define(builder),
	}
}
