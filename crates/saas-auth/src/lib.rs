// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Role-based, ownership-aware authorization for the SaaS backend.
//!
//! Given an actor (id, role, optional tenant membership) this crate builds an
//! [`Ability`] and answers whether an action on a resource is permitted.
//!
//! # Overview
//!
//! ```text
//! resolve(actor) → policies::define(role) → [Rule, Rule, ...] → Ability
//!                                                                  │
//!                                           can(action, subject) ◄─┘
//! ```
//!
//! - [`catalog`]: closed sets of [`Action`]s and [`SubjectType`]s with the
//!   `manage` and `all` wildcards
//! - [`rule`] and [`condition`]: the rule model and its combinator conditions
//! - [`policies`]: one definition per [`Role`]
//! - [`ability`]: last-match-wins evaluation with a default deny
//! - [`resolver`]: the entry point callers use
//!
//! # Example
//!
//! ```
//! use saas_auth::{resolve, Action, Role, Subject, SubjectType, ProjectId, OrgId, UserId};
//!
//! let me = UserId::generate();
//! let ability = resolve(me, Role::Member, None)?;
//!
//! assert!(ability.can(Action::Invite, SubjectType::User));
//!
//! let project = Subject::project(ProjectId::generate(), me, OrgId::generate());
//! assert!(ability.can(Action::Delete, &project));
//! # Ok::<(), saas_auth::AuthError>(())
//! ```
//!
//! Configuration errors ([`AuthError`]) and denials are never conflated: a
//! denial is `false` from [`Ability::can`] or a [`Forbidden`] from
//! [`Ability::authorize`].

pub mod ability;
pub mod actor;
pub mod catalog;
pub mod condition;
pub mod error;
pub mod policies;
pub mod resolver;
pub mod rule;
pub mod subject;
pub mod types;

pub use ability::{Ability, AbilityBuilder, Decision, RuleHandle};
pub use actor::{ActorContext, TenantMembership};
pub use catalog::{Action, Attribute, SubjectType};
pub use condition::Condition;
pub use error::{AuthError, Forbidden};
pub use resolver::{resolve, resolve_context, resolve_named};
pub use rule::{Effect, OneOrMany, Rule};
pub use subject::{
	BillingSubject, InviteSubject, MemberSubject, OrganizationSubject, ProjectSubject, Subject,
	SubjectRef, UserSubject,
};
pub use types::{InviteId, MemberId, OrgId, ProjectId, Role, UserId};
