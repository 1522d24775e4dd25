use salvo::affix_state;
use salvo::logging::Logger;
use salvo::prelude::*;

use crate::web::WebState;
use crate::web::handlers::{
    health::health_check,
    items::{create_item, delete_item, get_item, list_items, update_item},
};

pub fn create_router(state: WebState) -> Router {
    Router::new()
        .hoop(Logger::new())
        .hoop(affix_state::inject(state))
        .push(Router::with_path("health").get(health_check))
        .push(
            Router::with_path("items")
                .get(list_items)
                .post(create_item)
                .push(
                    Router::with_path("{id}")
                        .get(get_item)
                        .put(update_item)
                        .delete(delete_item),
                ),
        )
}
