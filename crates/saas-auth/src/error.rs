// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the authorization engine.
//!
//! Two outcomes are kept strictly apart:
//!
//! - [`AuthError`]: a configuration defect (unknown role, a rule that pairs an
//!   action with a subject type that cannot take it, a malformed subject).
//!   These fail ability construction or subject decoding and are never turned
//!   into a denial.
//! - [`Forbidden`]: an ordinary denial, produced only by
//!   [`Ability::authorize`](crate::Ability::authorize) when evaluation says no.

use serde::Serialize;

use crate::catalog::{Action, Attribute, SubjectType};

/// Configuration errors raised while resolving an ability or decoding a subject.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
	/// Role name outside the closed role set.
	#[error("unknown role '{0}'")]
	UnknownRole(String),

	/// Action name outside the closed action set.
	#[error("unknown action '{0}'")]
	UnknownAction(String),

	/// Subject type name outside the closed subject type set.
	#[error("unknown subject type '{0}'")]
	UnknownSubjectType(String),

	/// A rule declares an action the subject type does not support.
	#[error("rule {rule}: action '{action}' is not supported on '{subject_type}'")]
	UnsupportedAction {
		rule: usize,
		action: Action,
		subject_type: SubjectType,
	},

	/// A rule's condition references an attribute the subject type does not carry.
	#[error("rule {rule}: condition references the {attribute} attribute which '{subject_type}' does not carry")]
	UnsupportedCondition {
		rule: usize,
		subject_type: SubjectType,
		attribute: Attribute,
	},

	/// A rule was declared with an empty action or subject type list.
	#[error("rule {0}: declares no actions or no subject types")]
	EmptyRule(usize),

	/// A subject payload could not be decoded.
	#[error("invalid subject: {0}")]
	InvalidSubject(String),
}

impl AuthError {
	/// Create an invalid subject error.
	pub fn invalid_subject(message: impl Into<String>) -> Self {
		Self::InvalidSubject(message.into())
	}
}

/// Denial returned by [`Ability::authorize`](crate::Ability::authorize).
///
/// Carries no transport status; callers map it onto whatever their consumer
/// expects. The message is the deciding rule's reason when one was declared,
/// otherwise a generic text that does not leak policy details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("forbidden: cannot {action} {subject_type}: {message}")]
pub struct Forbidden {
	pub action: Action,
	pub subject_type: SubjectType,
	pub message: String,
}

impl Forbidden {
	/// Message used when the deciding rule has no reason, or nothing matched.
	pub const DEFAULT_MESSAGE: &'static str = "Insufficient permissions";

	pub fn new(action: Action, subject_type: SubjectType, message: impl Into<String>) -> Self {
		Self {
			action,
			subject_type,
			message: message.into(),
		}
	}
}
