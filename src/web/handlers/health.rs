use salvo::prelude::*;
use serde_json::json;

use crate::web::web_state;

#[handler]
pub async fn health_check(depot: &mut Depot, res: &mut Response) {
    let uptime_seconds = match web_state(depot) {
        Ok(state) => state.started_at.elapsed().as_secs(),
        Err(err) => {
            res.render(err);
            return;
        }
    };

    res.render(Json(json!({
        "status": "ok",
        "uptime_seconds": uptime_seconds,
        "version": env!("CARGO_PKG_VERSION"),
    })));
}
