use thiserror::Error;

use crate::constants::{ADMIN_LOCKED_ERROR, WRONG_PASSWORD_ERROR};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AdminError {
    #[error("{}", WRONG_PASSWORD_ERROR)]
    WrongPassword,
    #[error("{}", ADMIN_LOCKED_ERROR)]
    Locked,
}

/// Shared-secret speed bump in front of the stock editor. Plain string
/// compare, unlimited retries. Not an access control mechanism.
#[derive(Debug, Clone)]
pub struct AdminGate {
    secret: String,
    unlocked: bool,
}

impl AdminGate {
    pub fn new(secret: impl Into<String>) -> Self {
        Self { secret: secret.into(), unlocked: false }
    }

    pub fn try_unlock(&mut self, password: &str) -> Result<(), AdminError> {
        if password == self.secret {
            self.unlocked = true;
            Ok(())
        } else {
            Err(AdminError::WrongPassword)
        }
    }

    pub fn unlock(&mut self, password: &str) -> bool {
        self.try_unlock(password).is_ok()
    }

    pub fn lock(&mut self) {
        self.unlocked = false;
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    pub fn ensure_unlocked(&self) -> Result<(), AdminError> {
        if self.unlocked {
            Ok(())
        } else {
            Err(AdminError::Locked)
        }
    }
}
