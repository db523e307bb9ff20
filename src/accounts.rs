//! "Add our accounts" panel shown above the shop.
//!
//! Lists the store's Fortnite accounts; picking one opens a friend form so
//! the visitor can share their username.

use std::time::Instant;

use crate::contact::{FriendForm, FriendRequestSender, Submission};

pub const ACCOUNT_COUNT: usize = 10;
pub const COLLAPSED_COUNT: usize = 3;

pub const ACCOUNT_ITEM_NAME: &str = "Fortnite Account Addition";
pub const ACCOUNT_ITEM_PRICE: &str = "0.00";

pub const SHOW_LESS_LABEL: &str = "Mostrar menos";

/// Account name for a 1-based index, e.g. `DropCito0001`.
pub fn account_name(number: usize) -> String {
    format!("DropCito{number:04}")
}

/// One visible row of the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountRow<'a> {
    /// `#1`, `#2`, ...
    pub label: String,
    pub name: &'a str,
}

#[derive(Debug, Clone)]
pub struct AccountsPanel {
    accounts: Vec<String>,
    expanded: bool,
    selected: Option<usize>,
    form: FriendForm,
}

impl Default for AccountsPanel {
    fn default() -> Self {
        Self::new(ACCOUNT_COUNT)
    }
}

impl AccountsPanel {
    pub fn new(count: usize) -> Self {
        Self {
            accounts: (1..=count).map(account_name).collect(),
            expanded: false,
            selected: None,
            form: FriendForm::new(),
        }
    }

    pub fn accounts(&self) -> &[String] {
        &self.accounts
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Rows currently shown: the first three unless expanded.
    pub fn visible(&self) -> Vec<AccountRow<'_>> {
        let shown = if self.expanded {
            self.accounts.len()
        } else {
            self.accounts.len().min(COLLAPSED_COUNT)
        };
        self.accounts[..shown]
            .iter()
            .enumerate()
            .map(|(i, name)| AccountRow {
                label: format!("#{}", i + 1),
                name,
            })
            .collect()
    }

    /// Label of the expand/collapse button, `None` when everything fits.
    pub fn toggle_label(&self) -> Option<String> {
        let hidden = self.accounts.len().saturating_sub(COLLAPSED_COUNT);
        if hidden == 0 {
            None
        } else if self.expanded {
            Some(SHOW_LESS_LABEL.to_string())
        } else {
            Some(format!("Mostrar {hidden} más"))
        }
    }

    pub fn toggle(&mut self) {
        self.expanded = !self.expanded;
    }

    /// Open the friend form for the account at `index` (0-based).
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.accounts.len() {
            return false;
        }
        self.selected = Some(index);
        self.form.reset();
        true
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.map(|i| self.accounts[i].as_str())
    }

    /// Return to the list, dropping whatever was typed.
    pub fn back(&mut self) {
        self.selected = None;
        self.form.reset();
    }

    pub fn username(&self) -> &str {
        self.form.username()
    }

    pub fn set_username(&mut self, username: impl Into<String>) {
        if self.selected.is_some() {
            self.form.set_username(username);
        }
    }

    pub fn submission(&self) -> Submission {
        self.form.submission()
    }

    pub fn submit<S>(&mut self, sender: &S, now: Instant) -> Submission
    where
        S: FriendRequestSender + ?Sized,
    {
        if self.selected.is_none() {
            return self.form.submission();
        }
        self.form.submit(sender, ACCOUNT_ITEM_NAME, ACCOUNT_ITEM_PRICE, now)
    }

    /// Go back to the list once a success has been shown long enough.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.form.success_expired(now) {
            self.back();
            return true;
        }
        false
    }
}
