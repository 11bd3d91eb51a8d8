// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Rule conditions.
//!
//! Conditions are a closed set of combinators rather than an embedded query
//! language. The two structural patterns every policy relies on are
//! [`Condition::OwnedByActor`] and [`Condition::WithinTenant`]; the rest
//! compose them. Because the set is closed, the attributes a condition
//! reads are known up front and checked against the rule's subject types when
//! an ability is built (see [`Condition::referenced_attributes`]).

use std::fmt;

use crate::actor::ActorContext;
use crate::catalog::Attribute;
use crate::subject::Subject;
use crate::types::Role;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
	/// The subject's owner is the actor.
	OwnedByActor,
	/// The subject lives in the organization the actor is acting within.
	WithinTenant,
	/// The actor holds this role in their current tenant.
	TenantRoleIs(Role),
	Not(Box<Condition>),
	/// True when every inner condition is true; empty is true.
	All(Vec<Condition>),
	/// True when any inner condition is true; empty is false.
	Any(Vec<Condition>),
}

impl Condition {
	pub fn not(self) -> Self {
		Condition::Not(Box::new(self))
	}

	pub fn and(self, other: Condition) -> Self {
		match self {
			Condition::All(mut inner) => {
				inner.push(other);
				Condition::All(inner)
			}
			this => Condition::All(vec![this, other]),
		}
	}

	pub fn or(self, other: Condition) -> Self {
		match self {
			Condition::Any(mut inner) => {
				inner.push(other);
				Condition::Any(inner)
			}
			this => Condition::Any(vec![this, other]),
		}
	}

	/// Evaluates the condition for one actor against one subject instance.
	pub fn evaluate(&self, actor: &ActorContext, subject: &Subject) -> bool {
		match self {
			Condition::OwnedByActor => subject.owner().is_some_and(|owner| actor.is(owner)),
			Condition::WithinTenant => actor.tenant_org() == Some(subject.tenant()),
			Condition::TenantRoleIs(role) => actor.tenant_role() == Some(*role),
			Condition::Not(inner) => !inner.evaluate(actor, subject),
			Condition::All(inner) => inner.iter().all(|c| c.evaluate(actor, subject)),
			Condition::Any(inner) => inner.iter().any(|c| c.evaluate(actor, subject)),
		}
	}

	/// Subject attributes this condition reads, without duplicates.
	pub fn referenced_attributes(&self) -> Vec<Attribute> {
		let mut out = Vec::new();
		self.collect_attributes(&mut out);
		out
	}

	fn collect_attributes(&self, out: &mut Vec<Attribute>) {
		let attribute = match self {
			Condition::OwnedByActor => Attribute::Owner,
			Condition::WithinTenant => Attribute::Tenant,
			Condition::TenantRoleIs(_) => return,
			Condition::Not(inner) => return inner.collect_attributes(out),
			Condition::All(inner) | Condition::Any(inner) => {
				for c in inner {
					c.collect_attributes(out);
				}
				return;
			}
		};
		if !out.contains(&attribute) {
			out.push(attribute);
		}
	}
}

impl fmt::Display for Condition {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fn list(f: &mut fmt::Formatter<'_>, name: &str, inner: &[Condition]) -> fmt::Result {
			write!(f, "{name}(")?;
			for (i, c) in inner.iter().enumerate() {
				if i > 0 {
					f.write_str(", ")?;
				}
				write!(f, "{c}")?;
			}
			f.write_str(")")
		}

		match self {
			Condition::OwnedByActor => f.write_str("owned_by_actor"),
			Condition::WithinTenant => f.write_str("within_tenant"),
			Condition::TenantRoleIs(role) => write!(f, "tenant_role_is({role})"),
			Condition::Not(inner) => write!(f, "not({inner})"),
			Condition::All(inner) => list(f, "all", inner),
			Condition::Any(inner) => list(f, "any", inner),
		}
	}
}
