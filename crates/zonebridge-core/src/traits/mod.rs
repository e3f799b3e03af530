//! Component traits
//!
//! One trait per external collaborator: the DNS provider, the hosting
//! control panel, and the relational ledger. Each has exactly one
//! production implementation crate; the workflows depend only on the
//! traits so tests can substitute recording doubles.

mod control_panel;
mod dns_provider;
mod ledger_store;

pub use control_panel::ControlPanel;
pub use dns_provider::DnsProvider;
pub use ledger_store::LedgerStore;
