/// End-to-end tests against SQLite storage and the JSON-RPC server
mod basic_integration;
