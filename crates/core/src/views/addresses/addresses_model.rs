use rust_decimal::Decimal;

use crate::views::FetchStatus;

/// One owned address and what is known about its balance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressRow {
    pub address: String,
    /// Last fetched balance; `None` until the first fetch succeeds.
    pub balance: Option<Decimal>,
    pub status: FetchStatus,
    /// Bumped on every fetch start for this row.
    pub generation: u64,
}

impl AddressRow {
    pub fn loading(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            balance: None,
            status: FetchStatus::Loading,
            generation: 0,
        }
    }
}

/// State behind the address list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressesState {
    pub address_current: String,
    pub rows: Vec<AddressRow>,
}

impl AddressesState {
    pub fn new(address_current: impl Into<String>, addresses: &[String]) -> Self {
        Self {
            address_current: address_current.into(),
            rows: addresses.iter().map(AddressRow::loading).collect(),
        }
    }

    pub fn row(&self, address: &str) -> Option<&AddressRow> {
        self.rows.iter().find(|r| r.address == address)
    }

    /// Marks every row as loading and returns each address with the
    /// generation its new fetch must report back.
    pub fn begin_fetches(&mut self) -> Vec<(String, u64)> {
        self.rows
            .iter_mut()
            .map(|row| {
                row.generation += 1;
                row.status = FetchStatus::Loading;
                (row.address.clone(), row.generation)
            })
            .collect()
    }

    /// Stores a balance fetch outcome on the matching row. A failure keeps
    /// the previously fetched balance. Returns false, leaving the row
    /// untouched, for unknown addresses and superseded fetches.
    pub fn apply_balance(
        &mut self,
        address: &str,
        generation: u64,
        outcome: Result<Decimal, String>,
    ) -> bool {
        let Some(row) = self.rows.iter_mut().find(|r| r.address == address) else {
            return false;
        };
        if row.generation != generation {
            return false;
        }
        match outcome {
            Ok(balance) => {
                row.balance = Some(balance);
                row.status = FetchStatus::Ready;
            }
            Err(reason) => row.status = FetchStatus::failed(reason),
        }
        true
    }

    /// Sum of every balance fetched so far, saturating at the largest
    /// representable value.
    pub fn total(&self) -> Decimal {
        self.rows
            .iter()
            .filter_map(|r| r.balance)
            .fold(Decimal::ZERO, |acc, balance| acc.saturating_add(balance))
    }

    pub fn is_loading(&self) -> bool {
        self.rows.iter().any(|r| r.status.is_loading())
    }
}
