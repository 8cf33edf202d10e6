//! Flattening Rust values and walking lists.
//!
//! Run with: cargo run --example lists

use dashdb::{to_db, DashOptions};
use serde::Serialize;
use std::error::Error;

#[derive(Serialize)]
struct Route {
    path: String,
    methods: Vec<String>,
}

#[derive(Serialize)]
struct Service {
    name: String,
    routes: Vec<Route>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let service = Service {
        name: "edge".to_string(),
        routes: vec![
            Route {
                path: "/health".to_string(),
                methods: vec!["GET".to_string()],
            },
            Route {
                path: "/items".to_string(),
                methods: vec!["GET".to_string(), "POST".to_string()],
            },
        ],
    };

    let db = to_db(&service)?;
    println!("{}", db);

    let routes = db.key("routes");
    for i in 0..routes.clone().length() {
        let route = routes.clone().index(i);
        let methods = route.clone().key("methods").length();
        println!("{} accepts {} method(s)", route.key("path").read_string(), methods);
    }

    // Keys with a '-' would change the shape of the data, so writes refuse them.
    let mut strict = dashdb::DashDb::with_options(DashOptions::new());
    if let Err(err) = strict.key_mut("user-id").write(7) {
        println!("\nrejected: {}", err);
    }

    Ok(())
}
