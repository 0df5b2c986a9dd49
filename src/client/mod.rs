//! Client Module
//!
//! Transaction authoring: builds chaincode deployment and invocation
//! transactions and signs them with the client's own key at construction.

mod client;


pub use client::NodeClient;
