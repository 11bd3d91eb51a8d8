// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Subject instances: the concrete resources a check is evaluated against.
//!
//! A [`Subject`] is a sum type with one variant per concrete [`SubjectType`];
//! each variant carries exactly the attributes conditions may reference, so a
//! subject can never exist without its discriminant. Callers holding a
//! database row convert it with the variant constructors, or decode a JSON
//! payload tagged with `__typename` through [`Subject::from_json`].

use serde::{Deserialize, Serialize};

use crate::catalog::SubjectType;
use crate::error::AuthError;
use crate::types::{InviteId, MemberId, OrgId, ProjectId, Role, UserId};

/// A user account, seen through the organization the request is scoped to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSubject {
	pub id: UserId,
	pub organization_id: OrgId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationSubject {
	pub id: OrgId,
	pub owner_id: UserId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSubject {
	pub id: ProjectId,
	pub owner_id: UserId,
	pub organization_id: OrgId,
}

/// A user's membership in one organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberSubject {
	pub id: MemberId,
	pub user_id: UserId,
	pub organization_id: OrgId,
	pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteSubject {
	pub id: InviteId,
	pub author_id: UserId,
	pub organization_id: OrgId,
}

/// An organization's billing account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingSubject {
	pub organization_id: OrgId,
}

/// A concrete resource, tagged with its subject type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "__typename")]
pub enum Subject {
	User(UserSubject),
	Organization(OrganizationSubject),
	Project(ProjectSubject),
	Member(MemberSubject),
	Invite(InviteSubject),
	Billing(BillingSubject),
}

impl Subject {
	pub fn user(id: UserId, organization_id: OrgId) -> Self {
		Subject::User(UserSubject {
			id,
			organization_id,
		})
	}

	pub fn organization(id: OrgId, owner_id: UserId) -> Self {
		Subject::Organization(OrganizationSubject { id, owner_id })
	}

	pub fn project(id: ProjectId, owner_id: UserId, organization_id: OrgId) -> Self {
		Subject::Project(ProjectSubject {
			id,
			owner_id,
			organization_id,
		})
	}

	pub fn member(id: MemberId, user_id: UserId, organization_id: OrgId, role: Role) -> Self {
		Subject::Member(MemberSubject {
			id,
			user_id,
			organization_id,
			role,
		})
	}

	pub fn invite(id: InviteId, author_id: UserId, organization_id: OrgId) -> Self {
		Subject::Invite(InviteSubject {
			id,
			author_id,
			organization_id,
		})
	}

	pub fn billing(organization_id: OrgId) -> Self {
		Subject::Billing(BillingSubject { organization_id })
	}

	/// Decodes a subject from a JSON value tagged with `__typename`.
	///
	/// A missing or unknown tag, or a missing attribute, is a configuration
	/// error rather than a denial.
	pub fn from_json(value: serde_json::Value) -> Result<Self, AuthError> {
		serde_json::from_value(value).map_err(|e| AuthError::invalid_subject(e.to_string()))
	}

	/// Decodes a subject from a JSON string tagged with `__typename`.
	pub fn from_json_str(json: &str) -> Result<Self, AuthError> {
		serde_json::from_str(json).map_err(|e| AuthError::invalid_subject(e.to_string()))
	}

	pub fn subject_type(&self) -> SubjectType {
		match self {
			Subject::User(_) => SubjectType::User,
			Subject::Organization(_) => SubjectType::Organization,
			Subject::Project(_) => SubjectType::Project,
			Subject::Member(_) => SubjectType::Member,
			Subject::Invite(_) => SubjectType::Invite,
			Subject::Billing(_) => SubjectType::Billing,
		}
	}

	/// The user who owns this subject. A user owns their own account.
	pub fn owner(&self) -> Option<UserId> {
		match self {
			Subject::User(u) => Some(u.id),
			Subject::Organization(o) => Some(o.owner_id),
			Subject::Project(p) => Some(p.owner_id),
			Subject::Member(m) => Some(m.user_id),
			Subject::Invite(i) => Some(i.author_id),
			Subject::Billing(_) => None,
		}
	}

	/// The organization this subject belongs to. An organization is its own tenant.
	pub fn tenant(&self) -> OrgId {
		match self {
			Subject::User(u) => u.organization_id,
			Subject::Organization(o) => o.id,
			Subject::Project(p) => p.organization_id,
			Subject::Member(m) => m.organization_id,
			Subject::Invite(i) => i.organization_id,
			Subject::Billing(b) => b.organization_id,
		}
	}
}

/// The target of a permission query: a concrete instance or a bare type.
///
/// Bare types answer "can the actor do this to any subject of the type",
/// e.g. listing projects before any project has been loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubjectRef<'a> {
	Instance(&'a Subject),
	Type(SubjectType),
}

impl SubjectRef<'_> {
	pub fn subject_type(&self) -> SubjectType {
		match self {
			SubjectRef::Instance(subject) => subject.subject_type(),
			SubjectRef::Type(ty) => *ty,
		}
	}
}

impl<'a> From<&'a Subject> for SubjectRef<'a> {
	fn from(subject: &'a Subject) -> Self {
		SubjectRef::Instance(subject)
	}
}

impl From<SubjectType> for SubjectRef<'_> {
	fn from(ty: SubjectType) -> Self {
		SubjectRef::Type(ty)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;
	use uuid::Uuid;

	fn uid(n: u128) -> UserId {
		UserId::new(Uuid::from_u128(n))
	}

	fn oid(n: u128) -> OrgId {
		OrgId::new(Uuid::from_u128(n))
	}

	#[test]
	fn discriminant_matches_variant() {
		let project = Subject::project(ProjectId::generate(), uid(1), oid(9));
		assert_eq!(project.subject_type(), SubjectType::Project);
		assert_eq!(Subject::billing(oid(9)).subject_type(), SubjectType::Billing);
	}

	#[test]
	fn attributes_follow_the_table() {
		let owner = uid(1);
		let org = oid(9);

		assert_eq!(Subject::user(owner, org).owner(), Some(owner));
		assert_eq!(Subject::user(owner, org).tenant(), org);
		assert_eq!(Subject::organization(org, owner).tenant(), org);
		assert_eq!(Subject::organization(org, owner).owner(), Some(owner));
		assert_eq!(
			Subject::member(MemberId::generate(), owner, org, Role::Member).owner(),
			Some(owner)
		);
		assert_eq!(Subject::invite(InviteId::generate(), owner, org).owner(), Some(owner));
		assert_eq!(Subject::billing(org).owner(), None);
		assert_eq!(Subject::billing(org).tenant(), org);
	}

	#[test]
	fn decodes_tagged_json() {
		let subject = Subject::from_json(json!({
			"__typename": "Project",
			"id": Uuid::from_u128(5).to_string(),
			"ownerId": Uuid::from_u128(1).to_string(),
			"organizationId": Uuid::from_u128(9).to_string(),
		}))
		.unwrap();

		assert_eq!(subject.subject_type(), SubjectType::Project);
		assert_eq!(subject.owner(), Some(uid(1)));
		assert_eq!(subject.tenant(), oid(9));
	}

	#[test]
	fn user_decodes_with_organization() {
		let subject = Subject::from_json_str(&format!(
			r#"{{"__typename":"User","id":"{}","organizationId":"{}"}}"#,
			Uuid::from_u128(7),
			Uuid::from_u128(9)
		))
		.unwrap();
		assert_eq!(subject, Subject::user(uid(7), oid(9)));
	}

	#[test]
	fn user_without_organization_is_a_configuration_error() {
		let err = Subject::from_json(json!({
			"__typename": "User",
			"id": Uuid::from_u128(7).to_string(),
		}))
		.unwrap_err();
		assert!(matches!(err, AuthError::InvalidSubject(ref msg) if msg.contains("organizationId")));
	}

	#[test]
	fn missing_discriminant_is_a_configuration_error() {
		let err = Subject::from_json(json!({
			"id": Uuid::from_u128(5).to_string(),
			"ownerId": Uuid::from_u128(1).to_string(),
		}))
		.unwrap_err();
		assert!(matches!(err, AuthError::InvalidSubject(_)));
	}

	#[test]
	fn unknown_discriminant_is_a_configuration_error() {
		let err = Subject::from_json(json!({ "__typename": "Repository", "id": "x" })).unwrap_err();
		assert!(matches!(err, AuthError::InvalidSubject(_)));
	}

	#[test]
	fn missing_attribute_is_a_configuration_error() {
		let err = Subject::from_json(json!({
			"__typename": "Project",
			"id": Uuid::from_u128(5).to_string(),
			"organizationId": Uuid::from_u128(9).to_string(),
		}))
		.unwrap_err();
		assert!(matches!(err, AuthError::InvalidSubject(ref msg) if msg.contains("ownerId")));
	}

	#[test]
	fn serializes_with_typename() {
		let json = serde_json::to_value(Subject::billing(oid(9))).unwrap();
		assert_eq!(json["__typename"], "Billing");
		assert_eq!(json["organizationId"], Uuid::from_u128(9).to_string());
	}

	#[test]
	fn subject_ref_reports_type() {
		let subject = Subject::user(uid(1), oid(9));
		assert_eq!(SubjectRef::from(&subject).subject_type(), SubjectType::User);
		assert_eq!(
			SubjectRef::from(SubjectType::Invite).subject_type(),
			SubjectType::Invite
		);
	}
}
