// Service module exports

pub mod mutation;
pub mod provider;
pub mod settings;
pub mod store;
