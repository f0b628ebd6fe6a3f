pub mod authenticator;
pub mod authority;
pub mod extract;
pub mod jwt;
pub mod mapper;
pub mod principal;
pub mod scope;

#[cfg(test)]
pub(crate) mod test_support;

pub use authenticator::TokenAuthenticator;
pub use authority::{Authority, AuthoritySet};
pub use mapper::{ClaimsAuthorityMapper, MapperConfig};
pub use principal::AuthenticatedPrincipal;
