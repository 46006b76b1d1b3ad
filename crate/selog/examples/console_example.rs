//! Example of the console logging facade
//! cargo run --example console_example -p selog

use selog::{infoc, infot, log_init, warnc, Field, LogFacade};

fn main() {
    log_init(Some("debug"));

    let logger = LogFacade::new_std(Some("info"));
    logger.debug("filtered out: below the info level");
    logger.info("plain message");
    logger.infof(format_args!("formatted message: {} + {} = {}", 1, 2, 1 + 2));

    let gateway = logger.named("gateway");
    gateway.warn("named logger");
    logger
        .named("a-very-long-service-name-here")
        .info("truncated name");

    let conn = gateway.with([
        Field::string("peer", "10.0.0.7:51234"),
        Field::uint("conn_id", 17),
    ]);
    conn.info("accepted");
    infot!(conn, "handshake took {} ms", 12);

    handle_request();

    // plain `tracing` events go through the global dispatcher installed above
    tracing::info!(component = "migrations", applied = 3_u64, "schema up to date");
}

fn handle_request() {
    infoc!("request served", Field::string("path", "/health"), Field::int("status", 200));
    warnc!("cache cold");
}
