use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Customer, Order, OrderItem};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CustomerDetails {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub location: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SubmitOrderRequest {
    pub customer: CustomerDetails,
    pub deposit_amount: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderWithItems {
    pub order: Order,
    pub customer: Customer,
    pub items: Vec<OrderItem>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderList {
    pub items: Vec<Order>,
}
