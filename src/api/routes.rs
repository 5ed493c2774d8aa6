//! API route configuration.

use axum::Router;
use axum::routing::{delete, get, post, put};

use super::handlers;
use super::state::AppState;
use crate::repository::Gradebook;

/// Build routes with generic gradebook type.
///
/// Registers handlers that are generic over the Gradebook trait, applying
/// the turbofish operator automatically.
macro_rules! routes {
    ($G:ty => {
        $($method:ident $path:expr => $($handler:ident)::+),* $(,)?
    }) => {{
        let router = Router::new();
        $(
            let router = router.route(&$path, $method($($handler)::+::<$G>));
        )*
        router
    }};
}

/// Create the API router.
///
/// Line item paths are mounted under the state's split token, i.e.
/// `/{context_id}/lineitems/{line_item_id}` for the default token.
pub fn create_router<G: Gradebook + 'static>(state: AppState<G>) -> Router {
    let container = format!("/{{context_id}}{}", state.split_token());
    let line_item = format!("{container}/{{line_item_id}}");

    let system_routes = Router::new().route("/health", get(handlers::health));

    let line_item_routes = routes!(G => {
        get container => handlers::list_line_items,
        post container => handlers::create_line_item,
        get line_item => handlers::get_line_item,
        put line_item => handlers::update_line_item,
        delete line_item => handlers::delete_line_item,
    });

    let grade_routes = routes!(G => {
        post format!("{line_item}/scores") => handlers::publish_score,
        get format!("{line_item}/results") => handlers::list_results,
    });

    system_routes
        .merge(line_item_routes)
        .merge(grade_routes)
        .with_state(state)
}
