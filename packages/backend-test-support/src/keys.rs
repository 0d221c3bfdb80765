//! RSA key fixtures and token minting for auth tests.
//!
//! Two unrelated 2048-bit RSA key pairs are checked in under `fixtures/`:
//! `primary` is the key a test JWKS publishes, `rogue` is one it never
//! publishes. Both are test-only material.

use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde_json::{json, Value};

/// Key identifier the test JWKS publishes for the primary key.
pub const PRIMARY_KID: &str = "test-primary-1";

/// Key identifier used for tokens signed by the rogue key.
pub const ROGUE_KID: &str = "test-rogue-1";

pub const PRIMARY_PRIVATE_PEM: &str = include_str!("../fixtures/primary_private.pem");
pub const PRIMARY_PUBLIC_PEM: &str = include_str!("../fixtures/primary_public.pem");
pub const ROGUE_PRIVATE_PEM: &str = include_str!("../fixtures/rogue_private.pem");
pub const ROGUE_PUBLIC_PEM: &str = include_str!("../fixtures/rogue_public.pem");

/// RSA modulus of the primary key (base64url, no padding).
pub const PRIMARY_MODULUS_B64: &str = "rcm2KoR_gULc6l9jxCNiz1zwWyUjpHpuE5RUmgyGVRzDWi8QHqnOT19Hs-Q8HGMLP-xzm1AoQBTc3ITULYwjZ2BCfFeXWOdj-4j04Jct1FZKyTAtLdGIH4btc0PeoSVbz9mklm2OTAmqkFkuaaJHVWQ_xVqDshR_AuxRwYmTsC3nxXxPgeCBU40WTlbVp7midqUz2APO8guell6ieI2__MXyjupGJ91kS4wWBXR5srswDnxlXduj4P_UOfp4jjFLFa3hxy1cEtXRAXMuXQpz1euSuau2MW5MDX4I65KaD3HnXSeLvXpLkz5sAkggloD1BYIUZIo_lOpLcYVB-C3eAQ";

/// RSA modulus of the rogue key (base64url, no padding).
pub const ROGUE_MODULUS_B64: &str = "zAGccnkhmnxquq8nddThQPuKP_ce43OXu9Aw8fG_6wJetGefHK9V3XOZmlx3A0jV7EMPLyPK5RxoIwZFFEMw18i-vkXZCby96G5aCZykHQET0a60N63tMkqOlGrc1-xb_SBDkV2SpGA6W4eba0L10Z79HKJlYUzyDUVRQ7INl7w_BX2gjLxdPmy_XwPcD3cuknJ6Coh6Q1VKxpONLp0YH2k9jNQePVARi9peQ8KzF6oKw6f5YPa9pMrdsdKj92Pyz59s6HvGMA1gVWfx1BimuG8nVmhI3JbPinVJZ0xUns9-p-2fvneHVd2018B1AsE_ExKDbgq3jLdz57d3a4ZO9w";

/// Public exponent shared by both keys (65537).
pub const RSA_EXPONENT_B64: &str = "AQAB";

/// Which fixture key signs a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestKey {
    Primary,
    Rogue,
}

impl TestKey {
    fn private_pem(self) -> &'static str {
        match self {
            TestKey::Primary => PRIMARY_PRIVATE_PEM,
            TestKey::Rogue => ROGUE_PRIVATE_PEM,
        }
    }
}

/// Current unix time in seconds.
pub fn now_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before unix epoch")
        .as_secs() as i64
}

/// Sign `claims` with the given fixture key using RS256 and the given `kid`.
pub fn mint_token(key: TestKey, kid: Option<&str>, claims: &Value) -> String {
    mint_token_with_alg(key, Algorithm::RS256, kid, claims)
}

/// Sign `claims` with the given fixture key and RSA algorithm.
pub fn mint_token_with_alg(
    key: TestKey,
    algorithm: Algorithm,
    kid: Option<&str>,
    claims: &Value,
) -> String {
    let mut header = Header::new(algorithm);
    header.kid = kid.map(str::to_string);

    let encoding_key =
        EncodingKey::from_rsa_pem(key.private_pem().as_bytes()).expect("fixture RSA key");
    encode(&header, claims, &encoding_key).expect("sign fixture token")
}

/// Token for `sub` signed by the primary key, expiring in one hour.
pub fn mint_valid_token(sub: &str) -> String {
    let now = now_secs();
    mint_token(
        TestKey::Primary,
        Some(PRIMARY_KID),
        &json!({
            "sub": sub,
            "email": format!("{sub}@example.com"),
            "role": "authenticated",
            "aud": "authenticated",
            "iat": now,
            "exp": now + 3600,
        }),
    )
}

/// Token for `sub` signed by the primary key that expired an hour ago.
pub fn mint_expired_token(sub: &str) -> String {
    let now = now_secs();
    mint_token(
        TestKey::Primary,
        Some(PRIMARY_KID),
        &json!({
            "sub": sub,
            "iat": now - 7200,
            "exp": now - 3600,
        }),
    )
}

/// A JWK object for the primary key as an identity provider would publish it.
pub fn primary_jwk() -> Value {
    json!({
        "kty": "RSA",
        "kid": PRIMARY_KID,
        "alg": "RS256",
        "use": "sig",
        "n": PRIMARY_MODULUS_B64,
        "e": RSA_EXPONENT_B64,
    })
}

/// A JWK object for the rogue key under an arbitrary `kid`.
pub fn rogue_jwk(kid: &str) -> Value {
    json!({
        "kty": "RSA",
        "kid": kid,
        "alg": "RS256",
        "use": "sig",
        "n": ROGUE_MODULUS_B64,
        "e": RSA_EXPONENT_B64,
    })
}

/// A JWKS document containing the given keys.
pub fn jwks_document(keys: Vec<Value>) -> Value {
    json!({ "keys": keys })
}
