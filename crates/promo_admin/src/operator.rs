//! Operator identity check

use crate::error::{AdminError, Result};
use promo_core::UserId;

#[derive(Debug, Clone)]
pub struct OperatorGate {
    operator: UserId,
}

impl OperatorGate {
    pub fn new(operator: impl Into<UserId>) -> Self {
        Self {
            operator: operator.into(),
        }
    }

    pub fn operator(&self) -> &UserId {
        &self.operator
    }

    pub fn check(&self, caller: &UserId) -> Result<()> {
        if caller == &self.operator {
            Ok(())
        } else {
            tracing::warn!(caller = %caller, "Operator command refused");
            Err(AdminError::PermissionDenied(caller.clone()))
        }
    }
}
