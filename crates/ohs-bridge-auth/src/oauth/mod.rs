//! OAuth2/OIDC-style authorization flows.

pub mod authorize;
pub mod tenant;
pub mod token;

pub use authorize::{AuthorizationRequest, AuthorizationService, AuthorizeOutcome, StateParam};
pub use tenant::{SuffixTenantResolver, TenantResolver};
pub use token::{TokenResponse, TokenService, parse_basic_credentials};
