//! Service operations beyond scanning.
//!
//! Each sub-module groups related operations by area. All of them are
//! methods on [`ServiceApi`] and go through the shared [`AccessLayer`], so
//! a 401 from any of them ends the session the same way.

pub mod auth;
pub mod dashboard;
pub mod report;

use crate::access::AccessLayer;

#[derive(Debug, Clone)]
pub struct ServiceApi {
    access: AccessLayer,
}

impl ServiceApi {
    pub fn new(access: AccessLayer) -> Self {
        Self { access }
    }

    pub fn access(&self) -> &AccessLayer {
        &self.access
    }
}
