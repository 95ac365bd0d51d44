// src/schema/columns.rs

/// Report date, `YYYY-MM-DD`.
pub const DATE_COLUMN: &str = "As_of_Date_Form_YYYY-MM-DD";
pub const MARKET_NAME_COLUMN: &str = "Market_and_Exchange_Names";
pub const CONTRACT_CODE_COLUMN: &str = "CFTC_Contract_Market_Code";
pub const COMMODITY_CODE_COLUMN: &str = "CFTC_Commodity_Code";

/// Subset of report columns kept during parsing, in output order.
pub const RELEVANT_COLUMNS: [&str; 14] = [
    MARKET_NAME_COLUMN,
    DATE_COLUMN,
    CONTRACT_CODE_COLUMN,
    COMMODITY_CODE_COLUMN,
    "Open_Interest_All",
    "Prod_Merc_Positions_Long_All",
    "Prod_Merc_Positions_Short_All",
    "M_Money_Positions_Long_All",
    "M_Money_Positions_Short_All",
    "M_Money_Positions_Spread_All",
    "Swap_Positions_Long_All",
    // double underscore is how the CFTC spells it
    "Swap__Positions_Short_All",
    "Other_Rept_Positions_Long_All",
    "Other_Rept_Positions_Short_All",
];

/// String columns the CFTC pads with trailing spaces.
pub const TRIM_COLUMNS: [&str; 3] = [
    CONTRACT_CODE_COLUMN,
    COMMODITY_CODE_COLUMN,
    MARKET_NAME_COLUMN,
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn relevant_columns_are_unique() {
        let set: HashSet<&str> = RELEVANT_COLUMNS.iter().copied().collect();
        assert_eq!(set.len(), RELEVANT_COLUMNS.len());
    }

    #[test]
    fn designated_columns_are_retained() {
        for col in TRIM_COLUMNS.iter().chain(std::iter::once(&DATE_COLUMN)) {
            assert!(RELEVANT_COLUMNS.contains(col), "{col} not in allow-list");
        }
    }
}
