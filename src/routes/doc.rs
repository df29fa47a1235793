use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    cart::CartLine,
    dto::{
        cart::{AddToCartRequest, CartView, UpdateQuantityRequest},
        orders::{CustomerDetails, OrderList, OrderWithItems, SubmitOrderRequest},
        products::{CreateProductRequest, ProductList, QrPayload, UpdateProductRequest},
    },
    models::{Customer, Order, OrderItem, Product, User},
    response::{ApiResponse, Meta},
    routes::{admin, auth, cart, health, orders, params, products, scan},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::login,
        auth::register,
        scan::resolve_code,
        products::list_products,
        products::get_product,
        products::qr_payload,
        products::create_product,
        products::update_product,
        products::delete_product,
        cart::get_cart,
        cart::add_to_cart,
        cart::update_quantity,
        cart::remove_from_cart,
        cart::clear_cart,
        orders::submit_order,
        orders::get_order,
        admin::list_all_orders,
        admin::get_order_admin,
        admin::update_order_status,
        admin::stats
    ),
    components(
        schemas(
            User,
            Product,
            Customer,
            Order,
            OrderItem,
            CartLine,
            CartView,
            AddToCartRequest,
            UpdateQuantityRequest,
            SubmitOrderRequest,
            CustomerDetails,
            OrderWithItems,
            OrderList,
            CreateProductRequest,
            UpdateProductRequest,
            ProductList,
            QrPayload,
            admin::UpdateOrderStatusRequest,
            admin::StatsData,
            params::Pagination,
            params::ProductQuery,
            params::OrderListQuery,
            Meta,
            ApiResponse<Product>,
            ApiResponse<ProductList>,
            ApiResponse<CartView>,
            ApiResponse<OrderWithItems>,
            ApiResponse<OrderList>,
            ApiResponse<admin::StatsData>
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Scan", description = "QR payload resolution"),
        (name = "Products", description = "Catalog endpoints"),
        (name = "Cart", description = "Cart endpoints"),
        (name = "Orders", description = "Order submission endpoints"),
        (name = "Admin", description = "Admin dashboard endpoints"),
        (name = "Auth", description = "Admin authentication endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
