pub mod auth_token;
pub mod validated_json;
pub mod verified_claims;

pub use auth_token::AuthToken;
pub use validated_json::ValidatedJson;
pub use verified_claims::VerifiedClaims;
