use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set, TransactionTrait};
use uuid::Uuid;

use crate::{
    audit,
    dto::orders::{OrderWithItems, SubmitOrderRequest},
    entity::{
        customers::{ActiveModel as CustomerActive, Entity as Customers, Model as CustomerModel},
        order_items::{
            ActiveModel as OrderItemActive, Column as OrderItemCol, Entity as OrderItems,
            Model as OrderItemModel,
        },
        orders::{ActiveModel as OrderActive, Entity as Orders, Model as OrderModel},
    },
    error::{AppError, AppResult},
    middleware::session::CartSession,
    models::{Customer, Order, OrderItem},
    response::{ApiResponse, Meta},
    services::cart_service,
    state::AppState,
};

/// Order submission: turn the session's cart plus the shopper's contact
/// details into one customer row, one order row and one order-item row per
/// line, atomically. The cart snapshot is cleared only after the transaction
/// commits, so a failed submission leaves the cart intact for a retry.
pub async fn submit_order(
    state: &AppState,
    session: &CartSession,
    payload: SubmitOrderRequest,
) -> AppResult<ApiResponse<OrderWithItems>> {
    let cart = cart_service::current_cart(state, session).await?;
    if cart.is_empty() {
        return Err(AppError::BadRequest("Cart is empty".into()));
    }

    let details = payload.customer;
    if details.name.trim().is_empty() || details.phone.trim().is_empty() {
        return Err(AppError::BadRequest("name and phone are required".into()));
    }

    let txn = state.orm.begin().await?;

    let customer = CustomerActive {
        id: Set(Uuid::new_v4()),
        name: Set(details.name.trim().to_string()),
        phone: Set(details.phone.trim().to_string()),
        email: Set(details.email.filter(|e| !e.trim().is_empty())),
        location: Set(details.location),
        created_at: NotSet,
    }
    .insert(&txn)
    .await?;

    let order = OrderActive {
        id: Set(Uuid::new_v4()),
        customer_id: Set(customer.id),
        total_amount: Set(cart.total_amount()),
        deposit_amount: Set(payload.deposit_amount),
        status: Set("pending".into()),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&txn)
    .await?;

    let mut items: Vec<OrderItem> = Vec::with_capacity(cart.lines().len());
    for line in cart.lines() {
        let item = OrderItemActive {
            id: Set(Uuid::new_v4()),
            order_id: Set(order.id),
            product_id: Set(line.product.id),
            product_code: Set(line.product.code.clone()),
            product_name: Set(line.product.name.clone()),
            unit_price: Set(line.product.price),
            quantity: Set(line.quantity),
            subtotal: Set(line.subtotal()),
            created_at: NotSet,
        }
        .insert(&txn)
        .await?;

        items.push(order_item_from_entity(item));
    }

    txn.commit().await?;

    // The one place the cart is cleared: immediately after a successful
    // submission.
    cart_service::delete_snapshot(&state.pool, session).await?;

    audit::record(
        &state.pool,
        None,
        "order_submit",
        Some("orders"),
        Some(serde_json::json!({ "order_id": order.id, "total_amount": order.total_amount })),
    )
    .await;

    Ok(ApiResponse::success(
        "Order submitted",
        OrderWithItems {
            order: order_from_entity(order),
            customer: customer_from_entity(customer),
            items,
        },
        Some(Meta::empty()),
    ))
}

/// Confirmation view: an order with its customer and item snapshots.
pub async fn get_order(state: &AppState, id: Uuid) -> AppResult<ApiResponse<OrderWithItems>> {
    let order = Orders::find_by_id(id).one(&state.orm).await?;
    let order = match order {
        Some(o) => o,
        None => return Err(AppError::NotFound),
    };

    let customer = Customers::find_by_id(order.customer_id)
        .one(&state.orm)
        .await?;
    let customer = match customer {
        Some(c) => c,
        None => return Err(AppError::NotFound),
    };

    let items = OrderItems::find()
        .filter(OrderItemCol::OrderId.eq(order.id))
        .all(&state.orm)
        .await?
        .into_iter()
        .map(order_item_from_entity)
        .collect();

    Ok(ApiResponse::success(
        "OK",
        OrderWithItems {
            order: order_from_entity(order),
            customer: customer_from_entity(customer),
            items,
        },
        Some(Meta::empty()),
    ))
}

pub fn order_from_entity(model: OrderModel) -> Order {
    Order {
        id: model.id,
        customer_id: model.customer_id,
        total_amount: model.total_amount,
        deposit_amount: model.deposit_amount,
        status: model.status,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}

pub fn order_item_from_entity(model: OrderItemModel) -> OrderItem {
    OrderItem {
        id: model.id,
        order_id: model.order_id,
        product_id: model.product_id,
        product_code: model.product_code,
        product_name: model.product_name,
        unit_price: model.unit_price,
        quantity: model.quantity,
        subtotal: model.subtotal,
        created_at: model.created_at.with_timezone(&Utc),
    }
}

pub fn customer_from_entity(model: CustomerModel) -> Customer {
    Customer {
        id: model.id,
        name: model.name,
        phone: model.phone,
        email: model.email,
        location: model.location,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
