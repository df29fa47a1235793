use uuid::Uuid;

use crate::{
    cart::Cart,
    db::DbPool,
    dto::cart::{AddToCartRequest, CartView},
    error::{AppError, AppResult},
    middleware::session::CartSession,
    models::Product,
    response::{ApiResponse, Meta},
    state::AppState,
};

/// Durable cart store. Each operation loads the session's snapshot (an
/// unparseable one degrades to an empty cart), applies exactly one mutation
/// on the in-memory [`Cart`], writes the new snapshot back, and returns the
/// updated view. The snapshot row is the single source of truth between
/// requests; concurrent writers to the same session key are last-write-wins.
async fn load_cart(pool: &DbPool, session: &CartSession) -> AppResult<Cart> {
    let row: Option<(String,)> =
        sqlx::query_as("SELECT data FROM cart_snapshots WHERE session_key = $1")
            .bind(&session.key)
            .fetch_optional(pool)
            .await?;

    Ok(row
        .map(|(data,)| Cart::from_snapshot(&data))
        .unwrap_or_default())
}

async fn save_cart(pool: &DbPool, session: &CartSession, cart: &Cart) -> AppResult<()> {
    sqlx::query(
        r#"
        INSERT INTO cart_snapshots (session_key, data)
        VALUES ($1, $2)
        ON CONFLICT (session_key)
        DO UPDATE SET data = EXCLUDED.data, updated_at = now()
        "#,
    )
    .bind(&session.key)
    .bind(cart.to_snapshot())
    .execute(pool)
    .await?;

    Ok(())
}

/// Drop the snapshot row entirely. Called once after a successful order
/// submission; the next load starts from an empty cart.
pub async fn delete_snapshot(pool: &DbPool, session: &CartSession) -> AppResult<()> {
    sqlx::query("DELETE FROM cart_snapshots WHERE session_key = $1")
        .bind(&session.key)
        .execute(pool)
        .await?;

    Ok(())
}

pub async fn get_cart(state: &AppState, session: &CartSession) -> AppResult<ApiResponse<CartView>> {
    let cart = load_cart(&state.pool, session).await?;
    Ok(ApiResponse::success("OK", cart.into(), Some(Meta::empty())))
}

pub async fn add_to_cart(
    state: &AppState,
    session: &CartSession,
    payload: AddToCartRequest,
) -> AppResult<ApiResponse<CartView>> {
    let product: Option<Product> = sqlx::query_as("SELECT * FROM products WHERE id = $1")
        .bind(payload.product_id)
        .fetch_optional(&state.pool)
        .await?;
    let product = match product {
        Some(p) => p,
        None => return Err(AppError::BadRequest("product not found".to_string())),
    };

    let mut cart = load_cart(&state.pool, session).await?;
    cart.add(product, payload.quantity);
    save_cart(&state.pool, session, &cart).await?;

    Ok(ApiResponse::success(
        "Added to cart",
        cart.into(),
        Some(Meta::empty()),
    ))
}

pub async fn update_quantity(
    state: &AppState,
    session: &CartSession,
    product_id: Uuid,
    quantity: i32,
) -> AppResult<ApiResponse<CartView>> {
    let mut cart = load_cart(&state.pool, session).await?;
    cart.update_quantity(product_id, quantity);
    save_cart(&state.pool, session, &cart).await?;

    Ok(ApiResponse::success("OK", cart.into(), Some(Meta::empty())))
}

pub async fn remove_item(
    state: &AppState,
    session: &CartSession,
    product_id: Uuid,
) -> AppResult<ApiResponse<CartView>> {
    let mut cart = load_cart(&state.pool, session).await?;
    cart.remove(product_id);
    save_cart(&state.pool, session, &cart).await?;

    Ok(ApiResponse::success(
        "Removed from cart",
        cart.into(),
        Some(Meta::empty()),
    ))
}

pub async fn clear_cart(
    state: &AppState,
    session: &CartSession,
) -> AppResult<ApiResponse<CartView>> {
    let mut cart = load_cart(&state.pool, session).await?;
    cart.clear();
    save_cart(&state.pool, session, &cart).await?;

    Ok(ApiResponse::success(
        "Cart cleared",
        cart.into(),
        Some(Meta::empty()),
    ))
}

/// Load the raw cart for checkout without going through a view.
pub async fn current_cart(state: &AppState, session: &CartSession) -> AppResult<Cart> {
    load_cart(&state.pool, session).await
}
