// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Compiled abilities and the permission evaluator.
//!
//! An [`Ability`] is an ordered, immutable list of rules bound to one
//! [`ActorContext`]. Evaluation is:
//!
//! 1. **Filter**: a rule matches when its actions cover the action (`manage`
//!    covers all), its subject types cover the subject's type (`all` covers
//!    all), and its condition is absent or holds.
//! 2. **Last match wins**: among matching rules, the one declared last decides.
//! 3. **Default deny**: no matching rule means no.
//!
//! Evaluation is a pure function of the ability and the query; only the
//! declared order of rules is consulted.

use tracing::instrument;

use crate::actor::ActorContext;
use crate::catalog::{Action, SubjectType};
use crate::condition::Condition;
use crate::error::{AuthError, Forbidden};
use crate::rule::{Effect, OneOrMany, Rule};
use crate::subject::SubjectRef;

/// Collects rules in declaration order for one actor.
///
/// Policy definitions receive a `&mut AbilityBuilder` and append to it; a
/// composing definition simply calls the narrower one first.
#[derive(Debug)]
pub struct AbilityBuilder {
	actor: ActorContext,
	rules: Vec<Rule>,
}

impl AbilityBuilder {
	pub fn new(actor: ActorContext) -> Self {
		Self {
			actor,
			rules: Vec::new(),
		}
	}

	/// The actor the ability is being built for.
	pub fn actor(&self) -> &ActorContext {
		&self.actor
	}

	/// Declares an allow rule.
	pub fn can(
		&mut self,
		actions: impl Into<OneOrMany<Action>>,
		subject_types: impl Into<OneOrMany<SubjectType>>,
	) -> RuleHandle<'_> {
		self.push(Rule::allow(actions, subject_types))
	}

	/// Declares a deny rule.
	pub fn cannot(
		&mut self,
		actions: impl Into<OneOrMany<Action>>,
		subject_types: impl Into<OneOrMany<SubjectType>>,
	) -> RuleHandle<'_> {
		self.push(Rule::deny(actions, subject_types))
	}

	/// Appends an already constructed rule.
	pub fn push(&mut self, rule: Rule) -> RuleHandle<'_> {
		self.rules.push(rule);
		let index = self.rules.len() - 1;
		RuleHandle {
			rule: &mut self.rules[index],
		}
	}

	/// Validates every rule and freezes the ability.
	pub fn build(self) -> Result<Ability, AuthError> {
		for (index, rule) in self.rules.iter().enumerate() {
			rule.validate(index)?;
		}

		Ok(Ability {
			actor: self.actor,
			rules: self.rules,
		})
	}
}

/// Refines the rule just declared on an [`AbilityBuilder`].
#[derive(Debug)]
pub struct RuleHandle<'a> {
	rule: &'a mut Rule,
}

impl RuleHandle<'_> {
	pub fn when(self, condition: Condition) -> Self {
		self.rule.condition = Some(condition);
		self
	}

	pub fn because(self, reason: impl Into<String>) -> Self {
		self.rule.reason = Some(reason.into());
		self
	}
}

/// The rule that decided a query, and where it sits in the ability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision<'a> {
	pub index: usize,
	pub rule: &'a Rule,
}

impl Decision<'_> {
	pub fn allowed(&self) -> bool {
		self.rule.effect == Effect::Allow
	}
}

/// An immutable, queryable rule sequence for one actor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ability {
	actor: ActorContext,
	rules: Vec<Rule>,
}

impl Ability {
	pub fn builder(actor: ActorContext) -> AbilityBuilder {
		AbilityBuilder::new(actor)
	}

	/// Builds an ability from a prepared rule list.
	pub fn from_rules(actor: ActorContext, rules: Vec<Rule>) -> Result<Self, AuthError> {
		let mut builder = AbilityBuilder::new(actor);
		for rule in rules {
			builder.push(rule);
		}
		builder.build()
	}

	pub fn actor(&self) -> &ActorContext {
		&self.actor
	}

	/// Rules in declaration order.
	pub fn rules(&self) -> &[Rule] {
		&self.rules
	}

	/// Returns true if the actor may perform `action` on the target.
	///
	/// The target is either a [`Subject`](crate::Subject) instance or a bare
	/// [`SubjectType`].
	pub fn can<'s>(&self, action: Action, target: impl Into<SubjectRef<'s>>) -> bool {
		self.decide(action, target.into())
	}

	/// Strict negation of [`Ability::can`].
	pub fn cannot<'s>(&self, action: Action, target: impl Into<SubjectRef<'s>>) -> bool {
		!self.can(action, target)
	}

	/// Returns the rule that decides the query, or `None` when nothing matches
	/// and the default deny applies.
	pub fn relevant_rule<'s>(
		&self,
		action: Action,
		target: impl Into<SubjectRef<'s>>,
	) -> Option<Decision<'_>> {
		let target = target.into();
		self
			.rules
			.iter()
			.enumerate()
			.rev()
			.find(|(_, rule)| rule.matches(&self.actor, action, target))
			.map(|(index, rule)| Decision { index, rule })
	}

	/// Rules whose action and subject type sets cover the pair, in declaration
	/// order. Conditions are not evaluated.
	pub fn rules_for(
		&self,
		action: Action,
		subject_type: SubjectType,
	) -> impl Iterator<Item = Decision<'_>> + '_ {
		self
			.rules
			.iter()
			.enumerate()
			.filter(move |(_, rule)| rule.covers(action, subject_type))
			.map(|(index, rule)| Decision { index, rule })
	}

	/// Like [`Ability::can`], but a denial becomes a [`Forbidden`] carrying the
	/// deciding rule's reason.
	#[instrument(
		level = "debug",
		skip(self, target),
		fields(actor_id = %self.actor.actor_id, role = %self.actor.role, action = %action)
	)]
	pub fn authorize<'s>(
		&self,
		action: Action,
		target: impl Into<SubjectRef<'s>>,
	) -> Result<(), Forbidden> {
		let target = target.into();
		let subject_type = target.subject_type();

		match self.relevant_rule(action, target) {
			Some(decision) if decision.allowed() => {
				tracing::debug!(%subject_type, rule = decision.index, "authorization check passed");
				Ok(())
			}
			Some(decision) => {
				tracing::info!(%subject_type, rule = decision.index, "authorization denied by rule");
				let message = decision
					.rule
					.reason
					.clone()
					.unwrap_or_else(|| Forbidden::DEFAULT_MESSAGE.to_string());
				Err(Forbidden::new(action, subject_type, message))
			}
			None => {
				tracing::info!(%subject_type, "authorization denied: no matching rule");
				Err(Forbidden::new(action, subject_type, Forbidden::DEFAULT_MESSAGE))
			}
		}
	}

	#[instrument(
		level = "debug",
		skip(self, target),
		fields(
			actor_id = %self.actor.actor_id,
			role = %self.actor.role,
			action = %action,
			subject_type = %target.subject_type(),
		)
	)]
	fn decide(&self, action: Action, target: SubjectRef<'_>) -> bool {
		let allowed = self
			.relevant_rule(action, target)
			.is_some_and(|decision| decision.allowed());
		tracing::debug!(allowed, "evaluated permission");
		allowed
	}
}
