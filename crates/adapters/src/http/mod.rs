mod envelope;
mod gateway;

pub use gateway::HttpBackendGateway;
