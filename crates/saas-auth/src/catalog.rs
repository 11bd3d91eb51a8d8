// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The closed universes of actions and subject types.
//!
//! Both enumerations include one wildcard member: [`Action::Manage`] matches
//! every action and [`SubjectType::All`] matches every subject type. New verbs
//! or resource kinds are added here and nowhere else; the tables below are
//! exhaustive matches, so the compiler points at every site that needs a
//! decision for the new value.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AuthError;

/// Verbs an actor can attempt against a subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
	/// Wildcard: matches every other action.
	Manage,
	Create,
	Get,
	Update,
	Delete,
	Invite,
	TransferOwnership,
	Export,
}

impl Action {
	/// Returns every action, wildcard first.
	pub fn all() -> &'static [Action] {
		&[
			Action::Manage,
			Action::Create,
			Action::Get,
			Action::Update,
			Action::Delete,
			Action::Invite,
			Action::TransferOwnership,
			Action::Export,
		]
	}

	/// Returns every action except the wildcard.
	pub fn concrete() -> &'static [Action] {
		&Self::all()[1..]
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			Action::Manage => "manage",
			Action::Create => "create",
			Action::Get => "get",
			Action::Update => "update",
			Action::Delete => "delete",
			Action::Invite => "invite",
			Action::TransferOwnership => "transfer_ownership",
			Action::Export => "export",
		}
	}

	/// Returns true if a rule declared for `self` covers a query for `requested`.
	pub fn covers(&self, requested: Action) -> bool {
		*self == Action::Manage || *self == requested
	}
}

impl fmt::Display for Action {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Action {
	type Err = AuthError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Action::all()
			.iter()
			.copied()
			.find(|action| action.as_str().eq_ignore_ascii_case(s))
			.ok_or_else(|| AuthError::UnknownAction(s.to_string()))
	}
}

/// Kinds of resources the engine protects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubjectType {
	User,
	Organization,
	Project,
	Member,
	Invite,
	Billing,
	/// Wildcard: matches every other subject type.
	#[serde(rename = "all")]
	All,
}

impl SubjectType {
	/// Returns every subject type, wildcard last.
	pub fn all() -> &'static [SubjectType] {
		&[
			SubjectType::User,
			SubjectType::Organization,
			SubjectType::Project,
			SubjectType::Member,
			SubjectType::Invite,
			SubjectType::Billing,
			SubjectType::All,
		]
	}

	/// Returns every subject type except the wildcard.
	pub fn concrete() -> &'static [SubjectType] {
		let all = Self::all();
		&all[..all.len() - 1]
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			SubjectType::User => "User",
			SubjectType::Organization => "Organization",
			SubjectType::Project => "Project",
			SubjectType::Member => "Member",
			SubjectType::Invite => "Invite",
			SubjectType::Billing => "Billing",
			SubjectType::All => "all",
		}
	}

	/// Returns true if a rule declared for `self` covers a query for `requested`.
	pub fn covers(&self, requested: SubjectType) -> bool {
		*self == SubjectType::All || *self == requested
	}

	/// Actions that may be declared against this subject type.
	pub fn supported_actions(&self) -> &'static [Action] {
		use Action::*;
		match self {
			SubjectType::User => &[Manage, Get, Update, Delete, Invite],
			SubjectType::Organization => &[Manage, Create, Get, Update, Delete, TransferOwnership],
			SubjectType::Project => &[Manage, Create, Get, Update, Delete],
			SubjectType::Member => &[Manage, Get, Update, Delete],
			SubjectType::Invite => &[Manage, Create, Get, Delete],
			SubjectType::Billing => &[Manage, Create, Get, Export],
			SubjectType::All => Action::all(),
		}
	}

	pub fn supports(&self, action: Action) -> bool {
		self.supported_actions().contains(&action)
	}

	/// Returns true if instances of this type carry `attribute`.
	///
	/// The wildcard carries an attribute only if every concrete type does.
	pub fn carries(&self, attribute: Attribute) -> bool {
		match (self, attribute) {
			(SubjectType::All, _) => Self::concrete().iter().all(|t| t.carries(attribute)),
			(SubjectType::Billing, Attribute::Owner) => false,
			_ => true,
		}
	}
}

impl fmt::Display for SubjectType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for SubjectType {
	type Err = AuthError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		SubjectType::all()
			.iter()
			.copied()
			.find(|ty| ty.as_str().eq_ignore_ascii_case(s))
			.ok_or_else(|| AuthError::UnknownSubjectType(s.to_string()))
	}
}

/// Subject attributes a condition can reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
	/// The user who owns the subject.
	Owner,
	/// The organization the subject lives in.
	Tenant,
}

impl fmt::Display for Attribute {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Attribute::Owner => f.write_str("owner"),
			Attribute::Tenant => f.write_str("tenant"),
		}
	}
}
