//! Request and response shapes of the HTTP API.
//!
//! Requests validate with `validator` derives; responses are built from the
//! domain entities through `From` impls.

pub mod auth;
pub mod booking;
pub mod city;
pub mod hotel;
pub mod review;
pub mod room;
pub mod user;

use hb_shared::types::pagination::DEFAULT_PER_PAGE;
use hb_shared::Pagination;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// `?page=&per_page=` on list endpoints
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl PageQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination::new(
            self.page.unwrap_or(1),
            self.per_page.unwrap_or(DEFAULT_PER_PAGE),
        )
    }
}
