#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate rocket;

use log::info;

use rocket_util::RequestLogger;

mod api;
mod config;
mod error;

#[rocket::main]
async fn main() {
    env_logger::init();

    let figment = rocket_util::figment();
    let config: config::Config = figment.extract().expect("Failed to load config");

    info!("Evaluating expressions up to depth {}", config.api.max_depth);

    rocket::custom(figment)
        .attach(RequestLogger::default())
        .register("/", rocket_util::catchers())
        .manage(config.api)
        .mount("/", api::routes())
        .launch()
        .await
        .expect("Rocket exited with error");
}
