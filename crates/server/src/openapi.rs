use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct ItemDoc {
    pub id: u64,
    pub name: String,
    pub price: f64,
}

#[derive(ToSchema)]
pub struct CreateItemDoc {
    /// Must be non-empty.
    pub name: String,
    /// Any number, integer or fractional.
    pub price: f64,
}

#[derive(ToSchema)]
pub struct UpdatePriceDoc { pub price: f64 }

#[derive(ToSchema)]
pub struct ErrorBodyDoc { pub error: String }

#[derive(ToSchema)]
pub struct MessageBodyDoc { pub message: String }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::prices::list,
        crate::routes::prices::create,
        crate::routes::prices::update_price,
        crate::routes::prices::delete,
    ),
    components(
        schemas(
            HealthResponse,
            ItemDoc,
            CreateItemDoc,
            UpdatePriceDoc,
            ErrorBodyDoc,
            MessageBodyDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "prices", description = "In-memory food and drink price lists")
    )
)]
pub struct PricesApiDoc;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::say::say,
    ),
    components(schemas(HealthResponse, ErrorBodyDoc)),
    tags(
        (name = "health"),
        (name = "say", description = "Relay to the external say function")
    )
)]
pub struct SayApiDoc;
