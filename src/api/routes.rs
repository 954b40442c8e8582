//! API route configuration.

use crate::api::handlers::{
    attach_tag_handler, create_link_handler, create_tag_handler, delete_link_handler,
    delete_tag_handler, detach_tag_handler, get_link_handler, get_tag_handler, link_tags_handler,
    list_links_handler, list_tags_handler, update_link_handler, update_tag_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get},
};

/// Link and tag management routes.
///
/// # Endpoints
///
/// - `GET    /links`                    - List active links with tags
/// - `POST   /links`                    - Create a link (with optional tags)
/// - `GET    /links/{id}`               - Get one link
/// - `PATCH  /links/{id}`               - Partially update a link
/// - `DELETE /links/{id}`               - Soft-delete a link
/// - `GET    /links/{id}/tags`          - List a link's tags
/// - `POST   /links/{id}/tags`          - Attach a tag (find-or-create)
/// - `DELETE /links/{id}/tags/{tag_id}` - Detach a tag
/// - `GET    /tags`                     - List tags
/// - `POST   /tags`                     - Create a tag
/// - `GET    /tags/{id}`                - Get one tag
/// - `PATCH  /tags/{id}`                - Rename a tag
/// - `DELETE /tags/{id}`                - Delete a tag
pub fn resource_routes() -> Router<AppState> {
    Router::new()
        .route("/links", get(list_links_handler).post(create_link_handler))
        .route(
            "/links/{id}",
            get(get_link_handler)
                .patch(update_link_handler)
                .delete(delete_link_handler),
        )
        .route(
            "/links/{id}/tags",
            get(link_tags_handler).post(attach_tag_handler),
        )
        .route("/links/{id}/tags/{tag_id}", delete(detach_tag_handler))
        .route("/tags", get(list_tags_handler).post(create_tag_handler))
        .route(
            "/tags/{id}",
            get(get_tag_handler)
                .patch(update_tag_handler)
                .delete(delete_tag_handler),
        )
}
