use rayon::prelude::*;

use crate::EmployeeRecord;
use crate::calculations::SalaryCalculator;

/// Annotates every record with its computed net salary.
///
/// Rows are independent, so they are computed in parallel; the output keeps
/// the input order. Records should already have been validated.
pub fn compute_batch(
    calculator: &SalaryCalculator<'_>,
    records: Vec<EmployeeRecord>,
) -> Vec<EmployeeRecord> {
    records
        .into_par_iter()
        .map(|record| {
            let result = calculator.compute(&record.request());
            record.with_net_salary(result.net_salary)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::{PayrollConfig, TaxSchedule};

    fn record(
        id: i64,
        name: &str,
        gross_salary: Decimal,
        number_of_dependents: u32,
    ) -> EmployeeRecord {
        EmployeeRecord {
            id,
            employee_name: name.to_string(),
            gross_salary,
            number_of_dependents,
            net_salary: None,
        }
    }

    #[test]
    fn compute_batch_annotates_each_row_in_order() {
        let schedule = TaxSchedule::default();
        let config = PayrollConfig::default();
        let calculator = SalaryCalculator::new(&schedule, &config);
        let records = vec![
            record(1, "John Doe", dec!(20000000), 0),
            record(2, "Jane Smith", dec!(30000000), 2),
            record(3, "Mike Johnson", dec!(15000000), 1),
        ];

        let results = compute_batch(&calculator, records);

        let ids: Vec<_> = results.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(results[0].net_salary, Some(dec!(17460000)));
        // 30M: taxable 30M - 3.15M - 19.8M = 7.05M; tax 250,000 + 205,000
        assert_eq!(results[1].net_salary, Some(dec!(26395000)));
        // 15M: taxable 15M - 1.575M - 15.4M < 0
        assert_eq!(results[2].net_salary, Some(dec!(13425000)));
    }

    #[test]
    fn compute_batch_rows_do_not_affect_each_other() {
        let schedule = TaxSchedule::default();
        let config = PayrollConfig::default();
        let calculator = SalaryCalculator::new(&schedule, &config);
        let alone = compute_batch(&calculator, vec![record(7, "Solo", dec!(45000000), 1)]);
        let mixed = compute_batch(
            &calculator,
            vec![
                record(1, "First", dec!(0), 0),
                record(7, "Solo", dec!(45000000), 1),
                record(9, "Last", dec!(900000000), 4),
            ],
        );

        assert_eq!(alone[0], mixed[1]);
    }

    #[test]
    fn compute_batch_preserves_other_fields() {
        let schedule = TaxSchedule::default();
        let config = PayrollConfig::default();
        let calculator = SalaryCalculator::new(&schedule, &config);

        let results = compute_batch(&calculator, vec![record(42, "Ann", dec!(1000), 3)]);

        assert_eq!(
            results[0],
            EmployeeRecord {
                id: 42,
                employee_name: "Ann".to_string(),
                gross_salary: dec!(1000),
                number_of_dependents: 3,
                net_salary: Some(dec!(895)),
            }
        );
    }

    #[test]
    fn compute_batch_empty() {
        let schedule = TaxSchedule::default();
        let config = PayrollConfig::default();
        let calculator = SalaryCalculator::new(&schedule, &config);

        assert!(compute_batch(&calculator, Vec::new()).is_empty());
    }
}
