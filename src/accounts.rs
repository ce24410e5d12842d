//! Account paths used by the posting rules, and the chart of accounts
//! derived from them.
//!
//! Paths are colon-delimited and hierarchical. They are compiled in as
//! constants: the set of accounts a payroll statement can touch changes
//! rarely, and every rule refers to accounts by these names.

// Asset accounts
pub const ASSET_401K_PRETAX_ELECTIVE: &str = "Assets:401k:PreTax:Elective";
pub const ASSET_401K_PRETAX_EMPLOYER: &str = "Assets:401k:PreTax:Employer";
pub const ASSET_401K_AFTERTAX: &str = "Assets:401k:AfterTax";
pub const ASSET_DCP_BONUS: &str = "Assets:DCP:Bonus";
pub const ASSET_DCP_REGULAR: &str = "Assets:DCP:Regular";
pub const ASSET_DCP_RESTOR: &str = "Assets:DCP:Restor";
pub const ASSET_FSA_DC: &str = "Assets:FSA:DC";
pub const ASSET_FSA_HEALTH: &str = "Assets:FSA:Health";
pub const ASSET_STOCKS_ESPP: &str = "Assets:Stocks:ESPP";
pub const ASSET_STOCKS_RSU: &str = "Assets:Stocks:RSU";
pub const ASSET_STOCKS_DRSU: &str = "Assets:Stocks:DRSU";
pub const ASSET_BANK_CHECKING: &str = "Assets:Bank:Checking";
pub const ASSET_RECEIVABLES_PTO: &str = "Assets:Receivables:PTO";

// Income accounts
pub const INCOME_TAXABLE_REGULAR: &str = "Income:Taxable:Regular";
pub const INCOME_TAXABLE_BONUS: &str = "Income:Taxable:Bonus";
pub const INCOME_TAXABLE_RSU: &str = "Income:Taxable:RSU";
pub const INCOME_TAXABLE_DRSU: &str = "Income:Taxable:DRSU";
pub const INCOME_TAXABLE_ESPP: &str = "Income:Taxable:ESPP";
pub const INCOME_TAXABLE_PTO: &str = "Income:Taxable:PTO";
pub const INCOME_TAXABLE_FLOAT_HOL: &str = "Income:Taxable:FloatHol";
pub const INCOME_TAXABLE_FLOATING_HOLIDAY: &str = "Income:Taxable:FloatingHoliday";
pub const INCOME_TAXABLE_MISC: &str = "Income:Taxable:Misc";
pub const INCOME_TAXABLE_IMPUTED: &str = "Income:Taxable:Imputed";
pub const INCOME_NONTAXABLE_401K: &str = "Income:NonTaxable:401k";
pub const INCOME_NONTAXABLE_DRSU: &str = "Income:NonTaxable:DRSU";
pub const INCOME_NONTAXABLE_MISC: &str = "Income:NonTaxable:Misc";

// Expense accounts
pub const EXPENSE_PRETAX_DENTAL: &str = "Expenses:Pretax:Dental";
pub const EXPENSE_PRETAX_MEDICAL: &str = "Expenses:Pretax:Medical";
pub const EXPENSE_PRETAX_VISION: &str = "Expenses:Pretax:Vision";
pub const EXPENSE_AFTERTAX_INSURANCE_LIFE: &str = "Expenses:Aftertax:Insurance:Life";
pub const EXPENSE_AFTERTAX_INSURANCE_ILLNESS: &str = "Expenses:Aftertax:Insurance:Illness";
pub const EXPENSE_AFTERTAX_INSURANCE_LEGAL: &str = "Expenses:Aftertax:Insurance:Legal";
pub const EXPENSE_AFTERTAX_MISC: &str = "Expenses:Aftertax:Misc";
pub const EXPENSE_TAXES_FEDERAL: &str = "Expenses:Taxes:Federal";
pub const EXPENSE_TAXES_STATE: &str = "Expenses:Taxes:State";
pub const EXPENSE_TAXES_CALIFORNIA: &str = "Expenses:Taxes:California";
pub const EXPENSE_TAXES_FICA: &str = "Expenses:Taxes:FICA";
pub const EXPENSE_TAXES_MEDICARE: &str = "Expenses:Taxes:Medicare";
pub const EXPENSE_TAXES_STOCK: &str = "Expenses:Taxes:Stock";

// Equity accounts
pub const EQUITY_INVISIBLE: &str = "Equity:Invisible";

/// Every leaf account path the rules can post to, sorted.
pub fn leaf_account_paths() -> Vec<&'static str> {
    let mut paths = vec![
        ASSET_401K_PRETAX_ELECTIVE,
        ASSET_401K_PRETAX_EMPLOYER,
        ASSET_401K_AFTERTAX,
        ASSET_DCP_BONUS,
        ASSET_DCP_REGULAR,
        ASSET_DCP_RESTOR,
        ASSET_FSA_DC,
        ASSET_FSA_HEALTH,
        ASSET_STOCKS_ESPP,
        ASSET_STOCKS_RSU,
        ASSET_STOCKS_DRSU,
        ASSET_BANK_CHECKING,
        ASSET_RECEIVABLES_PTO,
        INCOME_TAXABLE_REGULAR,
        INCOME_TAXABLE_BONUS,
        INCOME_TAXABLE_RSU,
        INCOME_TAXABLE_DRSU,
        INCOME_TAXABLE_ESPP,
        INCOME_TAXABLE_PTO,
        INCOME_TAXABLE_FLOAT_HOL,
        INCOME_TAXABLE_FLOATING_HOLIDAY,
        INCOME_TAXABLE_MISC,
        INCOME_TAXABLE_IMPUTED,
        INCOME_NONTAXABLE_401K,
        INCOME_NONTAXABLE_DRSU,
        INCOME_NONTAXABLE_MISC,
        EXPENSE_PRETAX_DENTAL,
        EXPENSE_PRETAX_MEDICAL,
        EXPENSE_PRETAX_VISION,
        EXPENSE_AFTERTAX_INSURANCE_LIFE,
        EXPENSE_AFTERTAX_INSURANCE_ILLNESS,
        EXPENSE_AFTERTAX_INSURANCE_LEGAL,
        EXPENSE_AFTERTAX_MISC,
        EXPENSE_TAXES_FEDERAL,
        EXPENSE_TAXES_STATE,
        EXPENSE_TAXES_CALIFORNIA,
        EXPENSE_TAXES_FICA,
        EXPENSE_TAXES_MEDICARE,
        EXPENSE_TAXES_STOCK,
        EQUITY_INVISIBLE,
    ];
    paths.sort_unstable();
    paths
}

/// Maps a top-level account name to its ledger account type.
pub fn account_kind(top_level: &str) -> &'static str {
    match top_level {
        "Assets" => "ASSET",
        "Income" => "INCOME",
        "Expenses" => "EXPENSE",
        "Equity" => "EQUITY",
        "Bank" => "BANK",
        _ => "ASSET",
    }
}
