pub mod exec;
pub mod forward;
pub mod getprop;
pub mod ports;
