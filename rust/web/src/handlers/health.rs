use serde::Serialize;
use warp::reply::Json;

#[derive(Serialize)]
struct HealthBody {
    status: &'static str,
    tables: usize,
}

pub fn health(tables: usize) -> Json {
    warp::reply::json(&HealthBody {
        status: "ok",
        tables,
    })
}
