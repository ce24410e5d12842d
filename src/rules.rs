//! Line-item classification and the posting rule registry.
//!
//! Every distinct line-item label observed on real statements has an entry
//! in the exact-match table; labels that vary (embedded rates or hour
//! counts) are caught by an ordered list of pattern rules with
//! first-match-wins semantics. A description that matches nothing simply
//! produces no postings.

use crate::accounts::*;
use regex::Regex;
use std::collections::HashMap;

/// How a matched line item turns into postings.
///
/// The registry is polymorphic over handlers; `Earnings` is the base rule
/// used when an entry declares nothing more specific.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Handler {
    /// Append one posting to the earnings group with the printed sign
    /// inverted.
    Earnings,

    /// The earnings rule with the amount negated first, so the cash leg
    /// carries the printed amount and balances the rest of the group.
    TotalNetPay,

    /// Employer-match style pair in a dedicated group: the funding asset
    /// account against a non-taxable income offset.
    GroupedMatch {
        /// Posting-group name, created on first use.
        group: &'static str,
        /// Non-taxable income account offsetting the asset leg.
        offset: &'static str,
    },

    /// Equity-offset pair in the invisible group: records taxable income
    /// without touching the visible take-home total.
    ImputedIncome,

    /// Deferred restricted-stock vesting: direct income leg now, asset and
    /// stock-tax legs after all direct handlers have run.
    DrsuVest,

    /// Fully deferred stock-tax true-up over the final earnings totals.
    OutstandingStockTax,

    /// Read and log the figure; no ledger effect.
    Diagnostic,
}

/// A posting rule resolved from a line-item description.
#[derive(Debug, Clone)]
pub struct Rule {
    /// Primary account the rule posts against, when it posts.
    pub account: Option<&'static str>,

    /// Memo attached to the postings this rule produces.
    pub memo: &'static str,

    /// Posting behavior.
    pub handler: Handler,
}

impl Rule {
    const fn direct(account: &'static str, memo: &'static str) -> Self {
        Rule {
            account: Some(account),
            memo,
            handler: Handler::Earnings,
        }
    }

    const fn with_handler(account: &'static str, memo: &'static str, handler: Handler) -> Self {
        Rule {
            account: Some(account),
            memo,
            handler,
        }
    }

    const fn diagnostic(memo: &'static str) -> Self {
        Rule {
            account: None,
            memo,
            handler: Handler::Diagnostic,
        }
    }
}

/// A pattern rule tried, in order, when the exact table misses.
struct PatternRule {
    pattern: Regex,
    rule: Rule,
}

/// The classifier: exact-match table plus ordered pattern rules.
pub struct RuleSet {
    exact: HashMap<&'static str, Rule>,
    patterns: Vec<PatternRule>,
}

impl RuleSet {
    /// Builds the standard registry covering every line-item label observed
    /// on real statements.
    pub fn standard() -> Self {
        let mut exact = HashMap::new();

        exact.insert(
            "*401(k) PreTax Reg",
            Rule::direct(ASSET_401K_PRETAX_ELECTIVE, "Reg"),
        );
        exact.insert(
            "*401k PT BC",
            Rule::direct(ASSET_401K_PRETAX_ELECTIVE, "BC"),
        );
        exact.insert("*Def Comp - Bonus", Rule::direct(ASSET_DCP_BONUS, "Bonus"));
        exact.insert(
            "*Def Comp - Regular",
            Rule::direct(ASSET_DCP_REGULAR, "Regular"),
        );
        exact.insert(
            "*Dental Plan - Pre Tax",
            Rule::direct(EXPENSE_PRETAX_DENTAL, "Dental"),
        );
        exact.insert("*FSA - Dependent Care", Rule::direct(ASSET_FSA_DC, "DC"));
        exact.insert(
            "*Medical Plan - Pre tax",
            Rule::direct(EXPENSE_PRETAX_MEDICAL, "Medical"),
        );
        exact.insert(
            "*Vision Plan - Pre Tax",
            Rule::direct(EXPENSE_PRETAX_VISION, "Vision"),
        );
        exact.insert(
            "401k After-Tax Reg",
            Rule::direct(ASSET_401K_AFTERTAX, "Reg"),
        );
        exact.insert(
            "401k Mat TUP PY",
            Rule::with_handler(
                ASSET_401K_PRETAX_EMPLOYER,
                "TUP PY",
                Handler::GroupedMatch {
                    group: "match401k",
                    offset: INCOME_NONTAXABLE_401K,
                },
            ),
        );
        exact.insert(
            "401k Match - ER",
            Rule::with_handler(
                ASSET_401K_PRETAX_EMPLOYER,
                "ER",
                Handler::GroupedMatch {
                    group: "match401k",
                    offset: INCOME_NONTAXABLE_401K,
                },
            ),
        );
        exact.insert(
            "401k Match -ERB",
            Rule::with_handler(
                ASSET_401K_PRETAX_EMPLOYER,
                "ERB",
                Handler::GroupedMatch {
                    group: "match401k",
                    offset: INCOME_NONTAXABLE_401K,
                },
            ),
        );
        exact.insert(
            "Bank Fees",
            Rule::direct(INCOME_NONTAXABLE_MISC, "Bank Fees"),
        );
        exact.insert("Bonus", Rule::direct(INCOME_TAXABLE_BONUS, "Bonus"));
        exact.insert(
            "Child Life Insurance",
            Rule::direct(EXPENSE_AFTERTAX_INSURANCE_LIFE, "Child"),
        );
        exact.insert(
            "Critical Illness -Spouse",
            Rule::direct(EXPENSE_AFTERTAX_INSURANCE_ILLNESS, "Spouse"),
        );
        exact.insert(
            "Critical Illness Insur-EE",
            Rule::direct(EXPENSE_AFTERTAX_INSURANCE_ILLNESS, "EE"),
        );
        exact.insert(
            "DRSU Vest",
            Rule::with_handler(INCOME_NONTAXABLE_DRSU, "Vest", Handler::DrsuVest),
        );
        exact.insert(
            "Debt Forgiveness",
            Rule::with_handler(
                INCOME_TAXABLE_MISC,
                "Debt Forgiveness",
                Handler::ImputedIncome,
            ),
        );
        exact.insert(
            "EE Medicare Tax",
            Rule::direct(EXPENSE_TAXES_MEDICARE, "EE"),
        );
        exact.insert(
            "EE Social Security Tax",
            Rule::direct(EXPENSE_TAXES_FICA, "EE"),
        );
        exact.insert(
            "ESPP (Jan - June)",
            Rule::direct(ASSET_STOCKS_ESPP, "Jan - June"),
        );
        exact.insert(
            "ESPP (Jul - Dec)",
            Rule::direct(ASSET_STOCKS_ESPP, "Jul - Dec"),
        );
        exact.insert(
            "ESPP Disq Disp",
            Rule::with_handler(INCOME_TAXABLE_ESPP, "Disq Disp", Handler::ImputedIncome),
        );
        exact.insert(
            "ESPP Res REF 1H",
            Rule::direct(ASSET_STOCKS_ESPP, "Res REF 1H"),
        );
        exact.insert(
            "ESPP Res REF 2H",
            Rule::direct(ASSET_STOCKS_ESPP, "Res REF 2H"),
        );
        exact.insert(
            "Flexible Saving Acct",
            Rule::direct(ASSET_FSA_HEALTH, "FSA"),
        );
        exact.insert(
            "FloatHol 0.00",
            Rule::direct(INCOME_TAXABLE_FLOAT_HOL, "FloatHol"),
        );
        // Observed on statements but carries no ledger effect.
        exact.insert("FloatHol 8.00", Rule::diagnostic("FloatHol"));
        exact.insert(
            "Floating Holiday 136.93 8.00",
            Rule::direct(
                INCOME_TAXABLE_FLOATING_HOLIDAY,
                "Floating Holiday 136.93 8.00",
            ),
        );
        exact.insert("Gross Pay", Rule::diagnostic("Gross Pay"));
        exact.insert(
            "Imputed Income -",
            Rule::with_handler(
                INCOME_TAXABLE_IMPUTED,
                "Imputed Income",
                Handler::ImputedIncome,
            ),
        );
        exact.insert(
            "InLieu of Notice",
            Rule::direct(INCOME_TAXABLE_MISC, "InLieu of Notice"),
        );
        exact.insert(
            "Life Insurance - EE",
            Rule::direct(EXPENSE_AFTERTAX_INSURANCE_LIFE, "EE"),
        );
        exact.insert(
            "Life Insurance - Spouse",
            Rule::direct(EXPENSE_AFTERTAX_INSURANCE_LIFE, "Spouse"),
        );
        exact.insert(
            "Misc Pymt GUP",
            Rule::direct(INCOME_TAXABLE_MISC, "Misc Pymt GUP"),
        );
        exact.insert(
            "Misc. Deduction",
            Rule::direct(EXPENSE_AFTERTAX_MISC, "Misc. Deduction"),
        );
        exact.insert(
            "Non-EE Medicare Tax",
            Rule::direct(EXPENSE_TAXES_MEDICARE, "Non-EE"),
        );
        for label in [
            "PTO Payout 136.93 81.89",
            "Paid Time Off 136.93 24.00",
            "Paid Time Off 136.93 32.00",
            "Paid Time Off 136.93 40.00",
            "Paid Time Off 136.93 64.00",
            "Paid Time Off 136.93 8.00",
            "Paid Time Off 136.93 80.00",
            "Paid Time Off 136.93 88.00",
            "Paid Time Off 136.93 96.00",
            "Paid Time Off 136.93 9.00",
        ] {
            exact.insert(label, Rule::direct(INCOME_TAXABLE_PTO, label));
        }
        exact.insert(
            "Prepaid Legal Plan",
            Rule::direct(EXPENSE_AFTERTAX_INSURANCE_LEGAL, "Prepaid"),
        );
        exact.insert("RSU/PSU Stock", Rule::direct(INCOME_TAXABLE_RSU, "Stock"));
        for label in [
            "Regular Salary 16.00",
            "Regular Salary 40.00",
            "Regular Salary 48.00",
            "Regular Salary 56.00",
            "Regular Salary 64.00",
            "Regular Salary 72.00",
            "Regular Salary 80.00",
        ] {
            exact.insert(label, Rule::direct(INCOME_TAXABLE_REGULAR, label));
        }
        exact.insert(
            "Restor Match",
            Rule::with_handler(
                ASSET_DCP_RESTOR,
                "Match",
                Handler::GroupedMatch {
                    group: "matchrestor",
                    offset: INCOME_NONTAXABLE_MISC,
                },
            ),
        );
        exact.insert(
            "Stock Tax True Up",
            Rule::direct(EXPENSE_TAXES_STOCK, "Tax True Up"),
        );
        exact.insert(
            "Tax Deductions: California",
            Rule::direct(EXPENSE_TAXES_CALIFORNIA, "California"),
        );
        exact.insert(
            "Tax Deductions: Federal",
            Rule::direct(EXPENSE_TAXES_FEDERAL, "Federal"),
        );
        exact.insert(
            "Tax Deductions: State",
            Rule::direct(EXPENSE_TAXES_STATE, "State"),
        );
        exact.insert(
            "Total Net Pay",
            Rule::with_handler(ASSET_BANK_CHECKING, "Net Pay", Handler::TotalNetPay),
        );
        exact.insert(
            "Your federal taxable wages",
            Rule::diagnostic("Your federal taxable wages"),
        );
        exact.insert(
            "STK Tax OS RSU/P",
            Rule {
                account: None,
                memo: "STK Tax OS RSU/P",
                handler: Handler::OutstandingStockTax,
            },
        );

        // Order matters: patterns are tried top to bottom, first match wins.
        let patterns = vec![PatternRule {
            pattern: Regex::new(r"^PTO \d+\.\d+").expect("valid PTO pattern"),
            rule: Rule {
                account: Some(ASSET_RECEIVABLES_PTO),
                memo: "PTO 252.24",
                handler: Handler::Diagnostic,
            },
        }];

        RuleSet { exact, patterns }
    }

    /// Resolves a description to its posting rule.
    ///
    /// Exact lookup first, then the ordered pattern list. `None` means the
    /// line item has no ledger effect and is dropped.
    pub fn search(&self, desc: &str) -> Option<&Rule> {
        if let Some(rule) = self.exact.get(desc) {
            return Some(rule);
        }
        self.patterns
            .iter()
            .find(|p| p.pattern.is_match(desc))
            .map(|p| &p.rule)
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::standard()
    }
}
