//! Service layer for the staff directory.
//! - Employee listing (search/sort/paginate) and mutations over the `models` entities.
//! - Authentication: password policy, credential store and the session registry.
//! - Repository traits keep storage swappable; mocks back the doc examples.

pub mod errors;
pub mod pagination;
pub mod directory;
pub mod auth;
#[cfg(test)]
pub mod test_support;
