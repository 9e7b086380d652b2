//! Realtime push channel

mod gateway;

pub use gateway::RealtimeGateway;
