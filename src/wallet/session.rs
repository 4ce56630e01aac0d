/// Wallet session: which address the dashboard is showing
///
/// The address is an opaque string; nothing here signs or derives keys.

use std::fmt;
use std::str::FromStr;

use tracing::info;

use super::store::KeyValueStore;
use crate::core::error::StoreError;
use crate::util::format::truncate_address;

pub const WALLET_KEY: &str = "linera_wallet";
pub const WALLET_TYPE_KEY: &str = "linera_wallet_type";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WalletKind {
    #[default]
    Linera,
    Demo,
}

impl fmt::Display for WalletKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WalletKind::Linera => write!(f, "linera"),
            WalletKind::Demo => write!(f, "demo"),
        }
    }
}

impl FromStr for WalletKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "linera" => Ok(WalletKind::Linera),
            "demo" => Ok(WalletKind::Demo),
            other => Err(format!("unknown wallet type: {}", other)),
        }
    }
}

pub struct WalletSession<S: KeyValueStore> {
    store: S,
    address: Option<String>,
}

impl<S: KeyValueStore> WalletSession<S> {
    /// Session with whatever address the store remembers
    pub fn restore(store: S) -> Result<Self, StoreError> {
        let address = store.get(WALLET_KEY)?.filter(|a| !a.trim().is_empty());
        if let Some(addr) = &address {
            info!(address = %truncate_address(addr, 6, 4), "🔑 Restored saved wallet");
        }
        Ok(Self { store, address })
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    pub fn kind(&self) -> Result<Option<WalletKind>, StoreError> {
        Ok(self
            .store
            .get(WALLET_TYPE_KEY)?
            .and_then(|k| k.parse().ok()))
    }

    pub fn connect(&mut self, address: &str, kind: WalletKind) -> Result<(), StoreError> {
        let address = address.trim();
        if address.is_empty() {
            return Err(StoreError::EmptyAddress);
        }

        self.store.set(WALLET_KEY, address)?;
        self.store.set(WALLET_TYPE_KEY, &kind.to_string())?;
        self.address = Some(address.to_string());

        info!(address = %truncate_address(address, 10, 8), kind = %kind, "✅ Wallet connected");
        Ok(())
    }

    pub fn disconnect(&mut self) -> Result<(), StoreError> {
        self.address = None;
        self.store.remove(WALLET_KEY)?;
        self.store.remove(WALLET_TYPE_KEY)?;
        info!("👋 Wallet disconnected");
        Ok(())
    }
}
