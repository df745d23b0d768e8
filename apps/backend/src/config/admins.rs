//! Administrator allowlist keyed by Telegram user id.
//!
//! Loaded from `ADMIN_TELEGRAM_IDS`, a comma-separated list such as
//! `123456789, 987654321`. Blank entries are ignored; anything else that is
//! not an integer is a configuration error.

use std::collections::BTreeSet;

use crate::error::AppError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminAllowlist {
    ids: BTreeSet<i64>,
}

impl AdminAllowlist {
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let ids = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.parse::<i64>().map_err(|_| {
                    AppError::config(format!("ADMIN_TELEGRAM_IDS contains a non-integer entry: '{s}'"))
                })
            })
            .collect::<Result<BTreeSet<_>, _>>()?;

        Ok(Self { ids })
    }

    pub fn from_ids(ids: impl IntoIterator<Item = i64>) -> Self {
        Self {
            ids: ids.into_iter().collect(),
        }
    }

    pub fn is_admin(&self, telegram_id: i64) -> bool {
        self.ids.contains(&telegram_id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
