/**
 * Contact Routes
 *
 * - `GET /contacts` - List contacts
 * - `POST /contacts` - Create a contact
 * - `GET /contacts/{id}` - Fetch one contact
 * - `PUT /contacts/{id}` - Partial update
 * - `DELETE /contacts/{id}` - Delete a contact
 * - `PATCH /contacts/{id}/favorite` - Set the favorite flag
 *
 * Every route requires a session.
 */

use axum::{
    middleware,
    routing::{get, patch},
    Router,
};

use crate::backend::contacts::{
    create_contact, delete_contact, get_contact, list_contacts, update_contact, update_favorite,
};
use crate::backend::middleware::auth_middleware;
use crate::backend::server::state::AppState;

/// Configure contact routes
pub fn configure_contact_routes(
    router: Router<AppState>,
    app_state: &AppState,
) -> Router<AppState> {
    let contacts = Router::new()
        .route("/contacts", get(list_contacts).post(create_contact))
        .route(
            "/contacts/{id}",
            get(get_contact).put(update_contact).delete(delete_contact),
        )
        .route("/contacts/{id}/favorite", patch(update_favorite))
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            auth_middleware,
        ));

    router.merge(contacts)
}
