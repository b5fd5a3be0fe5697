//! Subscriber store: CRUD, filtered search, renewal history, and the
//! label-eligibility query.

pub mod handlers;
pub mod store;
pub mod validation;
