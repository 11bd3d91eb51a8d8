// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Regular organization members.

use crate::ability::AbilityBuilder;
use crate::catalog::{Action, SubjectType};
use crate::condition::Condition;

pub fn define(builder: &mut AbilityBuilder) {
	builder.can([Action::Get, Action::Invite], SubjectType::User);
	builder
		.can(Action::Get, [SubjectType::Organization, SubjectType::Member])
		.when(Condition::WithinTenant);
	builder.can([Action::Create, Action::Get], SubjectType::Project);
	builder
		.can([Action::Update, Action::Delete], SubjectType::Project)
		.when(Condition::OwnedByActor);
}
