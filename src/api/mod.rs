pub mod stripe_client;
pub mod transactions;
