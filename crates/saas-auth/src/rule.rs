// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The rule model: effect × actions × subject types × optional condition.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::actor::ActorContext;
use crate::catalog::{Action, SubjectType};
use crate::condition::Condition;
use crate::error::AuthError;
use crate::subject::SubjectRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Effect {
	Allow,
	Deny,
}

impl fmt::Display for Effect {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Effect::Allow => f.write_str("allow"),
			Effect::Deny => f.write_str("deny"),
		}
	}
}

/// One value or a list of values, accepted wherever a rule names its
/// actions or subject types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OneOrMany<T>(Vec<T>);

impl<T> OneOrMany<T> {
	pub fn into_vec(self) -> Vec<T> {
		self.0
	}
}

macro_rules! impl_one_or_many {
	($ty:ty) => {
		impl From<$ty> for OneOrMany<$ty> {
			fn from(value: $ty) -> Self {
				Self(vec![value])
			}
		}

		impl<const N: usize> From<[$ty; N]> for OneOrMany<$ty> {
			fn from(values: [$ty; N]) -> Self {
				Self(values.to_vec())
			}
		}

		impl From<&[$ty]> for OneOrMany<$ty> {
			fn from(values: &[$ty]) -> Self {
				Self(values.to_vec())
			}
		}

		impl From<Vec<$ty>> for OneOrMany<$ty> {
			fn from(values: Vec<$ty>) -> Self {
				Self(values)
			}
		}
	};
}

impl_one_or_many!(Action);
impl_one_or_many!(SubjectType);

fn dedup_in_order<T: PartialEq>(values: Vec<T>) -> Vec<T> {
	let mut out: Vec<T> = Vec::with_capacity(values.len());
	for v in values {
		if !out.contains(&v) {
			out.push(v);
		}
	}
	out
}

/// A single declared rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
	pub effect: Effect,
	pub actions: Vec<Action>,
	pub subject_types: Vec<SubjectType>,
	pub condition: Option<Condition>,
	/// Reported through [`Forbidden`](crate::Forbidden) when this rule denies.
	pub reason: Option<String>,
}

impl Rule {
	pub fn new(
		effect: Effect,
		actions: impl Into<OneOrMany<Action>>,
		subject_types: impl Into<OneOrMany<SubjectType>>,
	) -> Self {
		Self {
			effect,
			actions: dedup_in_order(actions.into().into_vec()),
			subject_types: dedup_in_order(subject_types.into().into_vec()),
			condition: None,
			reason: None,
		}
	}

	pub fn allow(
		actions: impl Into<OneOrMany<Action>>,
		subject_types: impl Into<OneOrMany<SubjectType>>,
	) -> Self {
		Self::new(Effect::Allow, actions, subject_types)
	}

	pub fn deny(
		actions: impl Into<OneOrMany<Action>>,
		subject_types: impl Into<OneOrMany<SubjectType>>,
	) -> Self {
		Self::new(Effect::Deny, actions, subject_types)
	}

	/// Builder: set the condition.
	pub fn when(mut self, condition: Condition) -> Self {
		self.condition = Some(condition);
		self
	}

	/// Builder: set the reason.
	pub fn because(mut self, reason: impl Into<String>) -> Self {
		self.reason = Some(reason.into());
		self
	}

	pub fn is_conditional(&self) -> bool {
		self.condition.is_some()
	}

	/// Returns true if the rule's action and subject type sets cover the pair,
	/// honouring both wildcards. Conditions are not consulted.
	pub fn covers(&self, action: Action, subject_type: SubjectType) -> bool {
		self.actions.iter().any(|a| a.covers(action))
			&& self.subject_types.iter().any(|t| t.covers(subject_type))
	}

	/// Returns true if the rule matches the query.
	///
	/// For a bare subject type there is no instance to evaluate the condition
	/// against: a conditional allow matches (some instances are permitted), a
	/// conditional deny does not (it only forbids some instances).
	pub fn matches(&self, actor: &ActorContext, action: Action, target: SubjectRef<'_>) -> bool {
		if !self.covers(action, target.subject_type()) {
			return false;
		}

		match (&self.condition, target) {
			(None, _) => true,
			(Some(condition), SubjectRef::Instance(subject)) => condition.evaluate(actor, subject),
			(Some(_), SubjectRef::Type(_)) => self.effect == Effect::Allow,
		}
	}

	/// Rejects declarations that could never be evaluated soundly.
	///
	/// `index` is the rule's position in the ability and is only used for
	/// error reporting.
	pub fn validate(&self, index: usize) -> Result<(), AuthError> {
		if self.actions.is_empty() || self.subject_types.is_empty() {
			return Err(AuthError::EmptyRule(index));
		}

		for subject_type in &self.subject_types {
			for action in &self.actions {
				if !subject_type.supports(*action) {
					return Err(AuthError::UnsupportedAction {
						rule: index,
						action: *action,
						subject_type: *subject_type,
					});
				}
			}

			if let Some(condition) = &self.condition {
				for attribute in condition.referenced_attributes() {
					if !subject_type.carries(attribute) {
						return Err(AuthError::UnsupportedCondition {
							rule: index,
							subject_type: *subject_type,
							attribute,
						});
					}
				}
			}
		}

		Ok(())
	}
}

impl fmt::Display for Rule {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let actions: Vec<&str> = self.actions.iter().map(|a| a.as_str()).collect();
		let subjects: Vec<&str> = self.subject_types.iter().map(|t| t.as_str()).collect();
		write!(
			f,
			"{} [{}] on [{}]",
			self.effect,
			actions.join(", "),
			subjects.join(", ")
		)?;
		if let Some(condition) = &self.condition {
			write!(f, " when {condition}")?;
		}
		if let Some(reason) = &self.reason {
			write!(f, " because \"{reason}\"")?;
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::subject::Subject;
	use crate::types::{OrgId, ProjectId, Role, UserId};
	use uuid::Uuid;

	fn uid(n: u128) -> UserId {
		UserId::new(Uuid::from_u128(n))
	}

	fn project(owner: u128) -> Subject {
		Subject::project(ProjectId::generate(), uid(owner), OrgId::new(Uuid::from_u128(9)))
	}

	#[test]
	fn duplicate_targets_are_collapsed() {
		let rule = Rule::allow(
			[Action::Get, Action::Get, Action::Create],
			[SubjectType::Project, SubjectType::Project],
		);
		assert_eq!(rule.actions, vec![Action::Get, Action::Create]);
		assert_eq!(rule.subject_types, vec![SubjectType::Project]);
	}

	#[test]
	fn manage_rule_covers_every_action_on_its_subject() {
		let rule = Rule::allow(Action::Manage, SubjectType::Project);
		for action in Action::all() {
			assert!(rule.covers(*action, SubjectType::Project));
		}
		assert!(!rule.covers(Action::Get, SubjectType::User));
	}

	#[test]
	fn all_rule_covers_every_subject_for_its_action() {
		let rule = Rule::allow(Action::Get, SubjectType::All);
		for ty in SubjectType::all() {
			assert!(rule.covers(Action::Get, *ty));
		}
		assert!(!rule.covers(Action::Delete, SubjectType::User));
	}

	mod matching {
		use super::*;

		#[test]
		fn condition_is_evaluated_against_instances() {
			let actor = ActorContext::new(uid(1), Role::Member);
			let rule = Rule::allow(Action::Delete, SubjectType::Project).when(Condition::OwnedByActor);
			assert!(rule.matches(&actor, Action::Delete, (&project(1)).into()));
			assert!(!rule.matches(&actor, Action::Delete, (&project(2)).into()));
		}

		#[test]
		fn conditional_allow_matches_bare_type() {
			let actor = ActorContext::new(uid(1), Role::Member);
			let rule = Rule::allow(Action::Delete, SubjectType::Project).when(Condition::OwnedByActor);
			assert!(rule.matches(&actor, Action::Delete, SubjectType::Project.into()));
		}

		#[test]
		fn conditional_deny_skips_bare_type() {
			let actor = ActorContext::new(uid(1), Role::Member);
			let rule = Rule::deny(Action::Delete, SubjectType::Project).when(Condition::OwnedByActor);
			assert!(!rule.matches(&actor, Action::Delete, SubjectType::Project.into()));
		}

		#[test]
		fn unconditional_rules_match_bare_type() {
			let actor = ActorContext::new(uid(1), Role::Member);
			let rule = Rule::deny(Action::Delete, SubjectType::Project);
			assert!(rule.matches(&actor, Action::Delete, SubjectType::Project.into()));
		}
	}

	mod validation {
		use super::*;

		#[test]
		fn accepts_supported_pairs() {
			assert!(Rule::allow([Action::Create, Action::Get], SubjectType::Project)
				.validate(0)
				.is_ok());
			assert!(Rule::allow(Action::Manage, SubjectType::All).validate(0).is_ok());
		}

		#[test]
		fn rejects_unsupported_action() {
			let err = Rule::allow(Action::Export, SubjectType::Project)
				.validate(4)
				.unwrap_err();
			assert_eq!(
				err,
				AuthError::UnsupportedAction {
					rule: 4,
					action: Action::Export,
					subject_type: SubjectType::Project,
				}
			);
		}

		#[test]
		fn rejects_owner_condition_on_billing() {
			let err = Rule::allow(Action::Get, SubjectType::Billing)
				.when(Condition::OwnedByActor)
				.validate(0)
				.unwrap_err();
			assert!(matches!(
				err,
				AuthError::UnsupportedCondition {
					subject_type: SubjectType::Billing,
					..
				}
			));
		}

		#[test]
		fn rejects_owner_condition_on_wildcard_subject() {
			let err = Rule::allow(Action::Get, SubjectType::All)
				.when(Condition::OwnedByActor.not())
				.validate(0)
				.unwrap_err();
			assert!(matches!(
				err,
				AuthError::UnsupportedCondition {
					subject_type: SubjectType::All,
					..
				}
			));
		}

		#[test]
		fn accepts_tenant_condition_on_wildcard_subject() {
			assert!(Rule::deny(Action::Manage, SubjectType::All)
				.when(Condition::WithinTenant.not())
				.validate(0)
				.is_ok());
		}

		#[test]
		fn rejects_empty_rule() {
			let rule = Rule::allow(Vec::<Action>::new(), SubjectType::Project);
			assert_eq!(rule.validate(2), Err(AuthError::EmptyRule(2)));
		}
	}

	#[test]
	fn display_lists_everything() {
		let rule = Rule::deny([Action::TransferOwnership, Action::Update], SubjectType::Organization)
			.when(Condition::OwnedByActor.not())
			.because("only the owner may do this");
		assert_eq!(
			rule.to_string(),
			"deny [transfer_ownership, update] on [Organization] when not(owned_by_actor) because \"only the owner may do this\""
		);
	}
}
