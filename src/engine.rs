//! The posting rule engine and transaction assembler.
//!
//! For each statement, line items with a usable amount are matched against
//! the rule registry and their handlers run in encounter order. Handlers
//! that depend on the final totals of other postings (stock-tax true-ups,
//! deferred-stock vesting) do not act immediately: they return a deferred
//! operation, and all deferred operations run in a second phase after every
//! direct handler has finished. This ordering is required because a
//! triggering line item may appear anywhere in the document relative to the
//! postings its computation sums over.
//!
//! Postings accumulate in named groups. Each group that ends up non-empty
//! becomes exactly one transaction, and by rule design each group nets to
//! zero independently of the others.

use crate::accounts;
use crate::amount::parse_amount;
use crate::decimal::Decimal2;
use crate::error::Result;
use crate::item::ItemRecord;
use crate::ledger::{Posting, Transaction, CURRENCY};
use crate::registry::AccountRegistry;
use crate::rules::{Handler, Rule, RuleSet};
use chrono::NaiveDate;
use indexmap::IndexMap;
use log::{debug, info, warn};

/// The posting group every default rule writes to.
pub const EARNINGS_GROUP: &str = "earnings";

/// Group for equity-offset pairs that keep taxable income off the visible
/// take-home total.
const INVISIBLE_GROUP: &str = "invisible";

/// Ordered, named collections of postings for one statement.
///
/// Groups are created on first use and live only for the duration of one
/// statement's processing.
#[derive(Debug, Default)]
pub struct PostingGroups {
    groups: IndexMap<String, Vec<Posting>>,
}

impl PostingGroups {
    /// Creates the container with the earnings group pre-created.
    pub fn new() -> Self {
        let mut groups = IndexMap::new();
        groups.insert(EARNINGS_GROUP.to_string(), Vec::new());
        PostingGroups { groups }
    }

    /// Appends a posting to the named group, creating it on first use.
    pub fn push(&mut self, group: &str, posting: Posting) {
        self.groups.entry(group.to_string()).or_default().push(posting);
    }

    /// Postings of the named group, empty slice if absent.
    pub fn get(&self, group: &str) -> &[Posting] {
        self.groups.get(group).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Sum of all posting values in the named group.
    pub fn total(&self, group: &str) -> Decimal2 {
        self.get(group).iter().map(|p| p.value).sum()
    }

    /// Sum of the named group's postings against one account.
    pub fn total_for_account(&self, group: &str, account_path: &str) -> Decimal2 {
        self.get(group)
            .iter()
            .filter(|p| p.account_path == account_path)
            .map(|p| p.value)
            .sum()
    }

    fn into_groups(self) -> IndexMap<String, Vec<Posting>> {
        self.groups
    }
}

/// A deferred computation: the parameters of a second-phase operation,
/// captured by value when the triggering line item was encountered.
#[derive(Debug, Clone)]
enum Deferred {
    /// Stock-tax true-up over the final earnings totals.
    OutstandingStockTax { value: Decimal2 },

    /// Settlement legs of a deferred-stock vest.
    DrsuVestSettle { value: Decimal2, memo: &'static str },
}

/// Executes posting rules against line items and assembles transactions.
pub struct PostingEngine<'a> {
    rules: &'a RuleSet,
    registry: &'a AccountRegistry,
}

impl<'a> PostingEngine<'a> {
    /// Creates an engine over a rule registry and an account registry.
    pub fn new(rules: &'a RuleSet, registry: &'a AccountRegistry) -> Self {
        PostingEngine { rules, registry }
    }

    /// Processes one statement's line-item rows into transactions.
    ///
    /// Runs all direct handlers in line-item encounter order, then all
    /// deferred operations in the order they were returned, then emits one
    /// transaction per non-empty posting group. An account path the
    /// registry cannot resolve aborts the statement.
    pub fn process(&self, rows: &[Vec<ItemRecord>], date: NaiveDate) -> Result<Vec<Transaction>> {
        let mut groups = PostingGroups::new();
        let mut deferred: Vec<Deferred> = Vec::new();

        for item in rows.iter().flatten() {
            let Some(raw) = selected_amount(item) else {
                continue;
            };

            let Some(rule) = self.rules.search(&item.desc) else {
                debug!("no rule for '{}', skipping", item.desc);
                continue;
            };

            let Some(value) = parse_amount(raw) else {
                warn!("unparsable amount '{raw}' for '{}', skipping", item.desc);
                continue;
            };

            if let Some(op) = self.apply_direct(rule, value, &item.desc, &mut groups)? {
                deferred.push(op);
            }
        }

        for op in deferred {
            self.apply_deferred(op, &mut groups)?;
        }

        Ok(assemble(groups, date))
    }

    /// Runs one direct handler, possibly returning a deferred operation.
    fn apply_direct(
        &self,
        rule: &Rule,
        value: Decimal2,
        desc: &str,
        groups: &mut PostingGroups,
    ) -> Result<Option<Deferred>> {
        match &rule.handler {
            Handler::Earnings => {
                self.push_earnings(rule, value, groups)?;
            }
            Handler::TotalNetPay => {
                // Double inversion: the cash leg carries the printed amount
                // and balances the rest of the earnings group.
                self.push_earnings(rule, -value, groups)?;
            }
            Handler::GroupedMatch { group, offset } => {
                let Some(asset) = rule.account else {
                    warn!("match rule for '{desc}' has no account, skipping");
                    return Ok(None);
                };
                self.registry.get(asset)?;
                self.registry.get(offset)?;
                groups.push(group, Posting::new(asset, rule.memo, value));
                groups.push(group, Posting::new(*offset, rule.memo, -value));
            }
            Handler::ImputedIncome => {
                self.registry.get(accounts::EQUITY_INVISIBLE)?;
                self.registry.get(accounts::INCOME_TAXABLE_IMPUTED)?;
                groups.push(
                    INVISIBLE_GROUP,
                    Posting::new(accounts::EQUITY_INVISIBLE, rule.memo, value),
                );
                groups.push(
                    INVISIBLE_GROUP,
                    Posting::new(accounts::INCOME_TAXABLE_IMPUTED, rule.memo, -value),
                );
            }
            Handler::DrsuVest => {
                self.registry.get(accounts::INCOME_TAXABLE_DRSU)?;
                groups.push(
                    EARNINGS_GROUP,
                    Posting::new(accounts::INCOME_TAXABLE_DRSU, rule.memo, -value),
                );
                return Ok(Some(Deferred::DrsuVestSettle {
                    value,
                    memo: rule.memo,
                }));
            }
            Handler::OutstandingStockTax => {
                return Ok(Some(Deferred::OutstandingStockTax { value }));
            }
            Handler::Diagnostic => {
                info!("{desc} {value}");
            }
        }
        Ok(None)
    }

    fn push_earnings(&self, rule: &Rule, value: Decimal2, groups: &mut PostingGroups) -> Result<()> {
        let Some(path) = rule.account else {
            warn!("earnings rule '{}' has no account, skipping", rule.memo);
            return Ok(());
        };
        self.registry.get(path)?;
        groups.push(EARNINGS_GROUP, Posting::new(path, rule.memo, -value));
        Ok(())
    }

    /// Runs one deferred operation against the final direct-phase state.
    fn apply_deferred(&self, op: Deferred, groups: &mut PostingGroups) -> Result<()> {
        match op {
            Deferred::OutstandingStockTax { value } => {
                let taxable_rsu =
                    groups.total_for_account(EARNINGS_GROUP, accounts::INCOME_TAXABLE_RSU);

                self.registry.get(accounts::ASSET_STOCKS_RSU)?;
                groups.push(
                    EARNINGS_GROUP,
                    Posting::new(accounts::ASSET_STOCKS_RSU, "aftertax rsu", value - taxable_rsu),
                );

                let delta = groups.total(EARNINGS_GROUP);
                self.registry.get(accounts::EXPENSE_TAXES_STOCK)?;
                groups.push(
                    EARNINGS_GROUP,
                    Posting::new(accounts::EXPENSE_TAXES_STOCK, "stock tax", -delta),
                );
            }
            Deferred::DrsuVestSettle { value, memo } => {
                let total = groups.total(EARNINGS_GROUP);

                self.registry.get(accounts::ASSET_STOCKS_DRSU)?;
                groups.push(
                    EARNINGS_GROUP,
                    Posting::new(accounts::ASSET_STOCKS_DRSU, memo, value),
                );

                self.registry.get(accounts::EXPENSE_TAXES_STOCK)?;
                groups.push(
                    EARNINGS_GROUP,
                    Posting::new(
                        accounts::EXPENSE_TAXES_STOCK,
                        "fica and medfica taxes",
                        -value - total,
                    ),
                );
            }
        }
        Ok(())
    }
}

/// Picks the amount a line item contributes, if any.
///
/// Items with a current-period value are always processed. Quota records
/// (balance but no current value) are gated by an inclusion filter that
/// compares the description against the PTO receivables account path where
/// the printed label was evidently intended, so it admits nothing.
/// TODO: confirm the intended quota filter against more real statements
/// before fixing the comparison.
fn selected_amount(item: &ItemRecord) -> Option<&str> {
    if let Some(cur) = &item.cur {
        return Some(cur);
    }
    if item.balance.is_some() && item.desc == accounts::ASSET_RECEIVABLES_PTO {
        return item.balance.as_deref();
    }
    None
}

/// Emits one transaction per non-empty posting group, in group-creation
/// order. Distinct groups are distinct, independently balancing economic
/// events, so a single statement may yield several transactions.
fn assemble(groups: PostingGroups, date: NaiveDate) -> Vec<Transaction> {
    groups
        .into_groups()
        .into_iter()
        .filter(|(_, postings)| !postings.is_empty())
        .map(|(name, postings)| {
            debug!("transaction '{name}' with {} postings", postings.len());
            Transaction {
                date,
                currency: CURRENCY.to_string(),
                postings,
            }
        })
        .collect()
}
