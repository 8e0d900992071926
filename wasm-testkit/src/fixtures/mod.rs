pub mod code;
pub mod contract;
pub mod packet;
