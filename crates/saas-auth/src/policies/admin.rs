// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Organization administrators.
//!
//! Admins manage everything inside the organization they are acting within,
//! except that only the organization's owner may update it or hand it over.

use crate::ability::AbilityBuilder;
use crate::catalog::{Action, SubjectType};
use crate::condition::Condition;

pub fn define(builder: &mut AbilityBuilder) {
	builder.can(Action::Manage, SubjectType::All);

	builder
		.cannot(
			Action::Manage,
			[
				SubjectType::Organization,
				SubjectType::Project,
				SubjectType::Member,
				SubjectType::Invite,
				SubjectType::Billing,
			],
		)
		.when(Condition::WithinTenant.not())
		.because("resource belongs to another organization");

	builder
		.cannot(
			[Action::TransferOwnership, Action::Update],
			SubjectType::Organization,
		)
		.because("only the organization owner can do this");

	builder
		.can(
			[Action::TransferOwnership, Action::Update],
			SubjectType::Organization,
		)
		.when(Condition::OwnedByActor.and(Condition::WithinTenant));
}
