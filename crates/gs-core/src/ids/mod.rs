//! Identifier newtypes shared across the domain.

mod id_macro;

use id_macro::impl_id;
use serde::{Deserialize, Serialize};

/// Identifies one wizard session (one user walking through one flow).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionId(String);

/// Identifies one issued async action. Retries always get a fresh id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActionId(String);

/// Identifies a submitted service application.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ApplicationId(String);

impl_id!(SessionId, ActionId, ApplicationId);
