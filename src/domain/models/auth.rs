use serde::{Deserialize, Serialize};

/// Claims carried by the access token minted by the external identity
/// provider. The service treats `sub` as an opaque requester id.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,
    pub role: String,
    pub exp: i64,
}
