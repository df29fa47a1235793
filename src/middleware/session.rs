use axum::extract::FromRequestParts;

use crate::error::AppError;

pub const CART_SESSION_HEADER: &str = "x-cart-session";

/// Identifies one shopper's cart. The storefront client generates an opaque
/// token per device and sends it on every cart and checkout request; it
/// becomes the key the serialized cart is stored under. There is no account
/// behind it and no cross-device merging: two writers to the same key are
/// last-write-wins.
#[derive(Debug, Clone)]
pub struct CartSession {
    pub key: String,
}

impl<S> FromRequestParts<S> for CartSession
where
    S: Send + Sync,
{
    type Rejection = AppError;
    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(CART_SESSION_HEADER)
            .ok_or_else(|| AppError::BadRequest("Missing x-cart-session header".into()))?;

        let key = value
            .to_str()
            .map_err(|_| AppError::BadRequest("Invalid x-cart-session header".into()))?
            .trim();

        if key.is_empty() || key.len() > 128 {
            return Err(AppError::BadRequest("Invalid x-cart-session header".into()));
        }

        Ok(CartSession {
            key: key.to_string(),
        })
    }
}
