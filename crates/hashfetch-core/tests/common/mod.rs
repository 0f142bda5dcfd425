pub mod connect_proxy;
pub mod delay_server;
