pub mod unauthed_ping;
