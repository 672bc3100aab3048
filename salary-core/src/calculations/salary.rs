//! Gross-to-net salary calculation.
//!
//! # Calculation Steps
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Insurance: gross × (social + health + unemployment rate), no cap |
//! | 2    | Personal deduction: personal allowance + dependents × dependent allowance |
//! | 3    | Taxable income: gross − insurance − personal deduction, minimum 0 |
//! | 4    | Personal income tax: progressive schedule applied to step 3 |
//! | 5    | Net salary: gross − insurance − tax |
//!
//! Gross salary is first normalized to cents. Intermediate amounts are exact
//! decimals. The total deduction (insurance plus tax) is rounded to cents
//! once; net salary is gross minus that total, so a one-cent raise never
//! lowers net. Reported insurance is rounded on its own and reported tax is
//! the remainder of the rounded total.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use salary_core::{PayrollConfig, SalaryCalculator, SalaryRequest, TaxSchedule};
//!
//! let schedule = TaxSchedule::default();
//! let config = PayrollConfig::default();
//! let calculator = SalaryCalculator::new(&schedule, &config);
//!
//! let result = calculator.compute(&SalaryRequest::new(dec!(20000000), 0));
//!
//! assert_eq!(result.insurance_amount, dec!(2100000.00));
//! assert_eq!(result.personal_income_tax, dec!(440000.00));
//! assert_eq!(result.net_salary, dec!(17460000.00));
//! ```

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::common::{non_negative, round_half_up};
use crate::{PayrollConfig, SalaryBreakdown, SalaryRequest, SalaryResult, TaxSchedule};

/// Converts gross salary into net salary under a borrowed schedule and
/// payroll configuration.
///
/// The calculator holds no mutable state; one instance can serve any number
/// of calls, from any number of threads.
#[derive(Debug, Clone, Copy)]
pub struct SalaryCalculator<'a> {
    schedule: &'a TaxSchedule,
    config: &'a PayrollConfig,
}

impl<'a> SalaryCalculator<'a> {
    pub fn new(
        schedule: &'a TaxSchedule,
        config: &'a PayrollConfig,
    ) -> Self {
        Self { schedule, config }
    }

    /// Computes net salary, insurance and personal income tax.
    ///
    /// The request is expected to have passed [`SalaryRequest::validate`].
    pub fn compute(
        &self,
        request: &SalaryRequest,
    ) -> SalaryResult {
        self.breakdown(request).result
    }

    /// Like [`compute`](Self::compute), also returning the personal deduction
    /// and taxable income.
    pub fn breakdown(
        &self,
        request: &SalaryRequest,
    ) -> SalaryBreakdown {
        let gross_salary = round_half_up(request.gross_salary);

        let insurance = self.insurance(gross_salary);
        let personal_deduction = self.personal_deduction(request.number_of_dependents);
        let taxable_income = self.taxable_income(gross_salary, insurance, personal_deduction);
        let tax = self.progressive_tax(taxable_income);

        let total_deduction = round_half_up(insurance + tax);
        let insurance_amount = round_half_up(insurance);
        let personal_income_tax = total_deduction - insurance_amount;
        let net_salary = gross_salary - total_deduction;

        debug!(
            %gross_salary,
            dependents = request.number_of_dependents,
            %insurance_amount,
            %personal_deduction,
            %taxable_income,
            %personal_income_tax,
            %net_salary,
            "computed net salary"
        );

        SalaryBreakdown {
            result: SalaryResult {
                gross_salary,
                net_salary,
                insurance_amount,
                personal_income_tax,
            },
            personal_deduction,
            taxable_income,
        }
    }

    /// Mandatory insurance contributions, a flat share of gross salary.
    pub fn insurance(
        &self,
        gross_salary: Decimal,
    ) -> Decimal {
        gross_salary * self.config.total_insurance_rate()
    }

    /// Personal allowance plus one dependent allowance per dependent.
    pub fn personal_deduction(
        &self,
        number_of_dependents: u32,
    ) -> Decimal {
        self.config.personal_deduction
            + Decimal::from(number_of_dependents) * self.config.dependent_deduction
    }

    /// Income left after insurance and deductions, clamped at zero.
    pub fn taxable_income(
        &self,
        gross_salary: Decimal,
        insurance: Decimal,
        personal_deduction: Decimal,
    ) -> Decimal {
        non_negative(gross_salary - insurance - personal_deduction)
    }

    /// Marginal tax: each slice of income is taxed at its own bracket's rate.
    ///
    /// Stops at the first bracket whose lower bound reaches the taxable
    /// income; later brackets contribute nothing.
    pub fn progressive_tax(
        &self,
        taxable_income: Decimal,
    ) -> Decimal {
        let mut tax = Decimal::ZERO;
        let mut lower_bound = Decimal::ZERO;

        for bracket in self.schedule.brackets() {
            if taxable_income <= lower_bound {
                break;
            }

            let slice_top = match bracket.upper_limit {
                Some(limit) => taxable_income.min(limit),
                None => taxable_income,
            };
            tax += (slice_top - lower_bound) * bracket.rate;

            match bracket.upper_limit {
                Some(limit) => lower_bound = limit,
                None => break,
            }
        }

        tax
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::TaxBracket;

    fn calculate(
        gross_salary: Decimal,
        dependents: u32,
    ) -> SalaryResult {
        let schedule = TaxSchedule::default();
        let config = PayrollConfig::default();
        SalaryCalculator::new(&schedule, &config)
            .compute(&SalaryRequest::new(gross_salary, dependents))
    }

    // =========================================================================
    // insurance tests
    // =========================================================================

    #[test]
    fn insurance_is_ten_and_a_half_percent_of_gross() {
        let schedule = TaxSchedule::default();
        let config = PayrollConfig::default();
        let calculator = SalaryCalculator::new(&schedule, &config);

        assert_eq!(calculator.insurance(dec!(10000000)), dec!(1050000));
    }

    #[test]
    fn insurance_has_no_cap() {
        let schedule = TaxSchedule::default();
        let config = PayrollConfig::default();
        let calculator = SalaryCalculator::new(&schedule, &config);

        assert_eq!(calculator.insurance(dec!(1000000000)), dec!(105000000));
    }

    // =========================================================================
    // personal_deduction tests
    // =========================================================================

    #[test]
    fn personal_deduction_without_dependents() {
        let schedule = TaxSchedule::default();
        let config = PayrollConfig::default();
        let calculator = SalaryCalculator::new(&schedule, &config);

        assert_eq!(calculator.personal_deduction(0), dec!(11000000));
    }

    #[test]
    fn personal_deduction_adds_each_dependent() {
        let schedule = TaxSchedule::default();
        let config = PayrollConfig::default();
        let calculator = SalaryCalculator::new(&schedule, &config);

        assert_eq!(calculator.personal_deduction(2), dec!(19800000));
    }

    // =========================================================================
    // taxable_income tests
    // =========================================================================

    #[test]
    fn taxable_income_subtracts_insurance_and_deduction() {
        let schedule = TaxSchedule::default();
        let config = PayrollConfig::default();
        let calculator = SalaryCalculator::new(&schedule, &config);

        let result = calculator.taxable_income(dec!(20000000), dec!(2100000), dec!(11000000));

        assert_eq!(result, dec!(6900000));
    }

    #[test]
    fn taxable_income_clamps_at_zero() {
        let schedule = TaxSchedule::default();
        let config = PayrollConfig::default();
        let calculator = SalaryCalculator::new(&schedule, &config);

        let result = calculator.taxable_income(dec!(10000000), dec!(1050000), dec!(11000000));

        assert_eq!(result, dec!(0));
    }

    // =========================================================================
    // progressive_tax tests
    // =========================================================================

    #[test]
    fn progressive_tax_zero_income() {
        let schedule = TaxSchedule::default();
        let config = PayrollConfig::default();
        let calculator = SalaryCalculator::new(&schedule, &config);

        assert_eq!(calculator.progressive_tax(dec!(0)), dec!(0));
    }

    #[test]
    fn progressive_tax_first_bracket() {
        let schedule = TaxSchedule::default();
        let config = PayrollConfig::default();
        let calculator = SalaryCalculator::new(&schedule, &config);

        // 4,000,000 × 5%
        assert_eq!(calculator.progressive_tax(dec!(4000000)), dec!(200000));
    }

    #[test]
    fn progressive_tax_exactly_at_first_limit() {
        let schedule = TaxSchedule::default();
        let config = PayrollConfig::default();
        let calculator = SalaryCalculator::new(&schedule, &config);

        assert_eq!(calculator.progressive_tax(dec!(5000000)), dec!(250000));
    }

    #[test]
    fn progressive_tax_spans_three_brackets() {
        let schedule = TaxSchedule::default();
        let config = PayrollConfig::default();
        let calculator = SalaryCalculator::new(&schedule, &config);

        // 5M × 5% + 5M × 10% + 5M × 15%
        assert_eq!(calculator.progressive_tax(dec!(15000000)), dec!(1500000));
    }

    #[test]
    fn progressive_tax_top_bracket() {
        let schedule = TaxSchedule::default();
        let config = PayrollConfig::default();
        let calculator = SalaryCalculator::new(&schedule, &config);

        // 18,150,000 through 80M, plus 88M × 35%
        assert_eq!(calculator.progressive_tax(dec!(168000000)), dec!(48950000));
    }

    #[test]
    fn progressive_tax_uses_injected_schedule() {
        let schedule = TaxSchedule::new(vec![
            TaxBracket::bounded(dec!(100), dec!(0.10)),
            TaxBracket::unbounded(dec!(0.50)),
        ])
        .unwrap();
        let config = PayrollConfig::default();
        let calculator = SalaryCalculator::new(&schedule, &config);

        // 100 × 10% + 50 × 50%
        assert_eq!(calculator.progressive_tax(dec!(150)), dec!(35));
    }

    // =========================================================================
    // compute (integration) tests
    // =========================================================================

    #[test]
    fn compute_without_dependents() {
        let result = calculate(dec!(20000000), 0);

        // Insurance: 20M × 10.5% = 2.1M
        // Taxable: 20M - 2.1M - 11M = 6.9M
        // Tax: 5M × 5% + 1.9M × 10% = 440,000
        assert_eq!(
            result,
            SalaryResult {
                gross_salary: dec!(20000000),
                net_salary: dec!(17460000),
                insurance_amount: dec!(2100000),
                personal_income_tax: dec!(440000),
            }
        );
    }

    #[test]
    fn compute_with_one_dependent() {
        let result = calculate(dec!(20000000), 1);

        // Taxable: 20M - 2.1M - 15.4M = 2.5M, all at 5%
        assert_eq!(result.insurance_amount, dec!(2100000));
        assert_eq!(result.personal_income_tax, dec!(125000));
        assert_eq!(result.net_salary, dec!(17775000));
    }

    #[test]
    fn compute_deductions_exceed_income() {
        let result = calculate(dec!(20000000), 2);

        // Taxable: 20M - 2.1M - 19.8M < 0, clamped
        assert_eq!(result.personal_income_tax, dec!(0));
        assert_eq!(result.net_salary, dec!(17900000));
    }

    #[test]
    fn compute_zero_gross() {
        let result = calculate(dec!(0), 0);

        assert_eq!(result.insurance_amount, dec!(0));
        assert_eq!(result.personal_income_tax, dec!(0));
        assert_eq!(result.net_salary, dec!(0));
    }

    #[test]
    fn compute_top_bracket() {
        let result = calculate(dec!(200000000), 0);

        // Insurance: 21M; taxable: 200M - 21M - 11M = 168M
        // Tax: 18.15M through 80M + 88M × 35% = 48.95M
        assert_eq!(result.insurance_amount, dec!(21000000));
        assert_eq!(result.personal_income_tax, dec!(48950000));
        assert_eq!(result.net_salary, dec!(130050000));
    }

    #[test]
    fn compute_with_nine_and_a_half_percent_insurance() {
        let schedule = TaxSchedule::default();
        let config = PayrollConfig {
            social_insurance_rate: dec!(0.07),
            ..PayrollConfig::default()
        };
        let calculator = SalaryCalculator::new(&schedule, &config);

        let breakdown = calculator.breakdown(&SalaryRequest::new(dec!(20000000), 0));

        // Insurance 1.9M; taxable 7.1M; tax 250,000 + 210,000
        assert_eq!(breakdown.taxable_income, dec!(7100000));
        assert_eq!(breakdown.result.insurance_amount, dec!(1900000));
        assert_eq!(breakdown.result.personal_income_tax, dec!(460000));
        assert_eq!(breakdown.result.net_salary, dec!(17640000));
    }

    #[test]
    fn compute_with_one_dependent_at_nine_and_a_half_percent() {
        let schedule = TaxSchedule::default();
        let config = PayrollConfig {
            social_insurance_rate: dec!(0.07),
            ..PayrollConfig::default()
        };
        let calculator = SalaryCalculator::new(&schedule, &config);

        let breakdown = calculator.breakdown(&SalaryRequest::new(dec!(20000000), 1));

        // Taxable: 20M - 1.9M - 15.4M = 2.7M, all at 5%
        assert_eq!(breakdown.taxable_income, dec!(2700000));
        assert_eq!(breakdown.result.personal_income_tax, dec!(135000));
        assert_eq!(breakdown.result.net_salary, dec!(17965000));
    }

    #[test]
    fn compute_top_bracket_at_nine_and_a_half_percent() {
        let schedule = TaxSchedule::default();
        let config = PayrollConfig {
            social_insurance_rate: dec!(0.07),
            ..PayrollConfig::default()
        };
        let calculator = SalaryCalculator::new(&schedule, &config);

        let breakdown = calculator.breakdown(&SalaryRequest::new(dec!(200000000), 0));

        // Taxable: 200M - 19M - 11M = 170M
        // Tax: 18.15M through 80M + 90M × 35% = 49.65M
        assert_eq!(breakdown.result.insurance_amount, dec!(19000000));
        assert_eq!(breakdown.taxable_income, dec!(170000000));
        assert_eq!(
            calculator.progressive_tax(dec!(170000000)) - calculator.progressive_tax(dec!(80000000)),
            dec!(31500000)
        );
        assert_eq!(breakdown.result.personal_income_tax, dec!(49650000));
        assert_eq!(breakdown.result.net_salary, dec!(131350000));
    }

    #[test]
    fn compute_normalizes_gross_to_cents() {
        let result = calculate(dec!(20000000.005), 0);

        assert_eq!(result.gross_salary, dec!(20000000.01));
        assert_eq!(result.insurance_amount, dec!(2100000.00));
        assert_eq!(result.personal_income_tax, dec!(440000.00));
        assert_eq!(result.net_salary, dec!(17460000.01));
        assert_eq!(result.net_salary.scale(), 2);
    }

    #[test]
    fn net_never_drops_on_cent_raises() {
        let schedule = TaxSchedule::default();
        let config = PayrollConfig::default();
        let calculator = SalaryCalculator::new(&schedule, &config);
        let mut gross = dec!(200000000.00);
        let mut previous = calculator.compute(&SalaryRequest::new(gross, 0));

        for _ in 0..5_000 {
            gross += dec!(0.01);
            let current = calculator.compute(&SalaryRequest::new(gross, 0));
            assert!(
                current.net_salary >= previous.net_salary,
                "net dropped from {} to {} at gross {gross}",
                previous.net_salary,
                current.net_salary
            );
            assert_eq!(
                current.net_salary,
                current.gross_salary - current.insurance_amount - current.personal_income_tax
            );
            previous = current;
        }
    }

    #[test]
    fn compute_rounds_only_reported_amounts() {
        let result = calculate(dec!(12345678.91), 0);

        // Insurance: 1,296,296.28555 → 1,296,296.29
        // Taxable: 12,345,678.91 - 1,296,296.28555 - 11M = 49,382.62445
        // Tax: 2,469.1312225
        // Total: 1,298,765.4167725 → 1,298,765.42, less insurance → 2,469.13
        assert_eq!(result.insurance_amount, dec!(1296296.29));
        assert_eq!(result.personal_income_tax, dec!(2469.13));
        assert_eq!(result.net_salary, dec!(11046913.49));
    }

    #[test]
    fn breakdown_reports_intermediate_amounts() {
        let schedule = TaxSchedule::default();
        let config = PayrollConfig::default();
        let calculator = SalaryCalculator::new(&schedule, &config);

        let breakdown = calculator.breakdown(&SalaryRequest::new(dec!(20000000), 1));

        assert_eq!(breakdown.personal_deduction, dec!(15400000));
        assert_eq!(breakdown.taxable_income, dec!(2500000));
        assert_eq!(breakdown.result, calculator.compute(&SalaryRequest::new(dec!(20000000), 1)));
    }
}
