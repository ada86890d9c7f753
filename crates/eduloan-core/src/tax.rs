use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Percent};
use crate::validation::{require_non_negative_rate, require_positive_money, require_tax_bracket};
use crate::EduLoanResult;

/// Years shown in a standard projection.
pub const DEFAULT_PROJECTION_YEARS: u32 = 5;

/// Share of principal assumed to remain after each year. A flat
/// approximation, deliberately not tied to the amortisation schedule.
pub const ANNUAL_PRINCIPAL_RETENTION: Decimal = dec!(0.95);

/// Brackets compared side by side for the first loan year.
pub const DEFAULT_COMPARISON_BRACKETS: [Percent; 3] = [dec!(5), dec!(20), dec!(30)];

/// Projected interest and tax effect for one loan year
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxYearProjection {
    pub year_index: u32,
    /// Principal the year's interest is charged on
    pub remaining_principal: Money,
    pub yearly_interest: Money,
    /// Deductible amount; equal to the interest, any statutory cap is applied by the caller
    pub tax_deduction: Money,
    pub tax_saving: Money,
}

/// Sums over a projection. Built by folding rows, not by the projector.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxTotals {
    pub total_interest: Money,
    pub total_deduction: Money,
    pub total_saving: Money,
}

impl TaxTotals {
    pub fn from_rows(rows: &[TaxYearProjection]) -> Self {
        rows.iter().fold(TaxTotals::default(), |acc, row| TaxTotals {
            total_interest: acc.total_interest + row.yearly_interest,
            total_deduction: acc.total_deduction + row.tax_deduction,
            total_saving: acc.total_saving + row.tax_saving,
        })
    }
}

/// First-year interest saving at one tax bracket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketSaving {
    pub tax_bracket_percent: Percent,
    pub first_year_interest: Money,
    pub tax_saving: Money,
}

/// Tax saved on an amount of deductible interest.
pub fn tax_saving(interest: Money, tax_bracket_percent: Percent) -> Money {
    interest * tax_bracket_percent / dec!(100)
}

/// Project yearly interest and the resulting tax saving.
///
/// Interest is a full year at the annual rate on the remaining principal,
/// which shrinks by a flat 5% between years.
pub fn project_tax_benefits(
    principal: Money,
    annual_rate_percent: Percent,
    tax_bracket_percent: Percent,
    year_count: u32,
) -> EduLoanResult<Vec<TaxYearProjection>> {
    require_positive_money("principal", principal)?;
    require_non_negative_rate("annual_rate_percent", annual_rate_percent)?;
    require_tax_bracket("tax_bracket_percent", tax_bracket_percent)?;

    let mut rows = Vec::new();
    let mut remaining = principal;

    for year in 1..=year_count {
        let yearly_interest = remaining * annual_rate_percent / dec!(100);
        rows.push(TaxYearProjection {
            year_index: year,
            remaining_principal: remaining,
            yearly_interest,
            tax_deduction: yearly_interest,
            tax_saving: tax_saving(yearly_interest, tax_bracket_percent),
        });
        remaining *= ANNUAL_PRINCIPAL_RETENTION;
    }

    log::debug!("tax projection: {year_count} years from principal {principal}");
    Ok(rows)
}

/// A full year of interest on the starting principal.
pub fn first_year_interest(principal: Money, annual_rate_percent: Percent) -> Money {
    principal * annual_rate_percent / dec!(100)
}

/// Saving on the first year's interest at each bracket, in the order given.
pub fn bracket_comparison(
    principal: Money,
    annual_rate_percent: Percent,
    brackets: &[Percent],
) -> EduLoanResult<Vec<BracketSaving>> {
    require_positive_money("principal", principal)?;
    require_non_negative_rate("annual_rate_percent", annual_rate_percent)?;

    let interest = first_year_interest(principal, annual_rate_percent);
    brackets
        .iter()
        .enumerate()
        .map(|(i, &bracket)| {
            require_tax_bracket(&format!("brackets[{i}]"), bracket)?;
            Ok(BracketSaving {
                tax_bracket_percent: bracket,
                first_year_interest: interest,
                tax_saving: tax_saving(interest, bracket),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_projection() {
        let rows = project_tax_benefits(dec!(1775000), dec!(8.15), dec!(30), 5).unwrap();
        assert_eq!(rows.len(), 5);

        // Year 1: 1,775,000 * 8.15% = 144,662.50; saving at 30% = 43,398.75
        assert_eq!(rows[0].yearly_interest, dec!(144662.50));
        assert_eq!(rows[0].tax_deduction, rows[0].yearly_interest);
        assert_eq!(rows[0].tax_saving, dec!(43398.75));

        for pair in rows.windows(2) {
            assert_eq!(
                pair[1].remaining_principal,
                pair[0].remaining_principal * dec!(0.95)
            );
        }
        assert_eq!(rows[4].year_index, 5);
    }

    #[test]
    fn test_totals_fold() {
        let rows = project_tax_benefits(dec!(100000), dec!(10), dec!(20), 2).unwrap();
        // 10,000 then 9,500 interest
        let totals = TaxTotals::from_rows(&rows);
        assert_eq!(totals.total_interest, dec!(19500));
        assert_eq!(totals.total_deduction, dec!(19500));
        assert_eq!(totals.total_saving, dec!(3900));
    }

    #[test]
    fn test_zero_years_is_empty() {
        let rows = project_tax_benefits(dec!(1000), dec!(8), dec!(30), 0).unwrap();
        assert!(rows.is_empty());
        assert_eq!(TaxTotals::from_rows(&rows), TaxTotals::default());
    }

    #[test]
    fn test_zero_bracket_saves_nothing() {
        let rows = project_tax_benefits(dec!(1000), dec!(8), Decimal::ZERO, 3).unwrap();
        assert!(rows.iter().all(|r| r.tax_saving.is_zero()));
    }

    #[test]
    fn test_bracket_comparison_reference_loan() {
        let rows =
            bracket_comparison(dec!(1775000), dec!(8.15), &DEFAULT_COMPARISON_BRACKETS).unwrap();
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r.first_year_interest == dec!(144662.50)));
        assert_eq!(rows[0].tax_saving, dec!(7233.125));
        assert_eq!(rows[1].tax_saving, dec!(28932.50));
        assert_eq!(rows[2].tax_saving, dec!(43398.75));
        assert_eq!(rows[2].tax_bracket_percent, dec!(30));
    }

    #[test]
    fn test_bracket_comparison_matches_projection_year_one() {
        let projection = project_tax_benefits(dec!(500000), dec!(9.5), dec!(20), 1).unwrap();
        let brackets = bracket_comparison(dec!(500000), dec!(9.5), &[dec!(20)]).unwrap();
        assert_eq!(brackets[0].first_year_interest, projection[0].yearly_interest);
        assert_eq!(brackets[0].tax_saving, projection[0].tax_saving);
    }

    #[test]
    fn test_bracket_comparison_rejects_out_of_range_bracket() {
        let err = bracket_comparison(dec!(1000), dec!(8), &[dec!(5), dec!(120)]).unwrap_err();
        assert!(err.to_string().contains("brackets[1]"), "{err}");
        assert!(bracket_comparison(dec!(1000), dec!(8), &[]).unwrap().is_empty());
    }

    #[test]
    fn test_long_projection_builds_incrementally() {
        let rows = project_tax_benefits(dec!(1000), dec!(8), dec!(30), 20_000).unwrap();
        assert_eq!(rows.len(), 20_000);
        assert_eq!(rows[19_999].year_index, 20_000);
        assert!(rows
            .windows(2)
            .all(|p| p[1].remaining_principal <= p[0].remaining_principal));
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(project_tax_benefits(Decimal::ZERO, dec!(8), dec!(30), 5).is_err());
        assert!(project_tax_benefits(dec!(1000), dec!(-1), dec!(30), 5).is_err());
        assert!(project_tax_benefits(dec!(1000), dec!(8), dec!(-30), 5).is_err());
    }
}
