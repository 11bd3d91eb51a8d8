// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Billing staff: everything a member can do, plus the organization's billing.

use crate::ability::AbilityBuilder;
use crate::catalog::{Action, SubjectType};
use crate::condition::Condition;

use super::member;

pub fn define(builder: &mut AbilityBuilder) {
	member::define(builder);
	builder
		.can(Action::Manage, SubjectType::Billing)
		.when(Condition::WithinTenant);
}
