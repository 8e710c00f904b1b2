#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use aoprism::core::protocol::{decode_ic, Dialect, Packet};
use aoprism::gateway::{app_state::AppState, config};

#[test]
fn facade_exposes_both_layers() {
    let cfg = config::load_from_str(
        "version: 1\ncharacters: [\"Phoenix\"]\nareas: [{ name: \"Lobby\" }]\n",
    )
    .unwrap();
    let app = AppState::new(cfg).unwrap();
    assert_eq!(app.player_count(), 0);

    let packet = Packet::parse("MS#chat#-#Phoenix#normal#hi#def#1#0#0#0#0#0#0#0#0").unwrap();
    let msg = decode_ic(&packet.args).unwrap();
    assert_eq!(msg.dialect, Dialect::Pre26);
}
