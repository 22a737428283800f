//! GraphQL HTTP endpoints
//!
//! - `POST /graphql` - execute a query or mutation
//! - `GET /graphql/playground` - interactive playground (non-production only)

use async_graphql::http::{playground_source, GraphQLPlaygroundConfig};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::State,
    response::{Html, IntoResponse},
    routing::{get, post},
    Router,
};

use crate::graphql::QuillpostSchema;
use crate::middleware::AuthContext;

/// Create the GraphQL router
pub fn graphql_router(schema: QuillpostSchema, playground: bool) -> Router {
    let router = Router::new().route("/", post(graphql_handler));

    let router = if playground {
        router.route("/playground", get(graphql_playground))
    } else {
        router
    };

    router.with_state(schema)
}

/// Execute a GraphQL request
///
/// The caller's [`AuthContext`] is derived from the bearer token and placed
/// into the request data. An absent or invalid token never fails the request
/// here; protected resolvers reject it themselves.
async fn graphql_handler(
    State(schema): State<QuillpostSchema>,
    auth: AuthContext,
    req: GraphQLRequest,
) -> GraphQLResponse {
    if let Some(user_id) = auth.user_id() {
        tracing::debug!(user_id = %user_id, "GraphQL request authenticated");
    }

    let request = req.into_inner().data(auth);
    schema.execute(request).await.into()
}

/// GraphQL Playground handler for development
async fn graphql_playground() -> impl IntoResponse {
    Html(playground_source(GraphQLPlaygroundConfig::new("/graphql")))
}
