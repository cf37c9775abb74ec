use mission_control_msvc::config::Settings;
use mission_control_msvc::serve;
use std::net::TcpListener;

#[tokio::main]
async fn main() {
    pretty_env_logger::init_timed();

    let settings = Settings::from_env();

    let listener = TcpListener::bind(&settings.bind_address)
        .expect("could not bind to BIND_ADDRESS");

    serve(listener, settings).await.expect("server stopped");
}
