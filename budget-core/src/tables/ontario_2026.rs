use std::sync::LazyLock;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::{
    CppSchedule, EiSchedule, FederalSchedule, HealthPremiumBand, PersonalAmountPhaseOut,
    ProvincialSchedule, Surtax, TaxBracket, TaxYearTable,
};

static ONTARIO_2026: LazyLock<TaxYearTable> = LazyLock::new(ontario_2026);

/// The 2026 federal + Ontario table the application ships with.
pub fn builtin_table() -> &'static TaxYearTable {
    &ONTARIO_2026
}

fn ontario_2026() -> TaxYearTable {
    TaxYearTable {
        tax_year: 2026,
        jurisdiction: "ON".to_string(),
        federal: FederalSchedule {
            brackets: vec![
                TaxBracket::bounded(dec!(58523), dec!(0.14)),
                TaxBracket::bounded(dec!(117045), dec!(0.205)),
                TaxBracket::bounded(dec!(181440), dec!(0.26)),
                TaxBracket::bounded(dec!(258482), dec!(0.29)),
                TaxBracket::unbounded(dec!(0.33)),
            ],
            personal_amount: PersonalAmountPhaseOut {
                maximum: dec!(16452),
                minimum: dec!(14829),
                phase_out_start: dec!(181440),
                phase_out_end: dec!(258482),
            },
        },
        provincial: ProvincialSchedule {
            brackets: vec![
                TaxBracket::bounded(dec!(53891), dec!(0.0505)),
                TaxBracket::bounded(dec!(107785), dec!(0.0915)),
                TaxBracket::bounded(dec!(150000), dec!(0.1116)),
                TaxBracket::bounded(dec!(220000), dec!(0.1216)),
                TaxBracket::unbounded(dec!(0.1316)),
            ],
            basic_personal_amount: dec!(12989),
            surtax: Surtax {
                first_threshold: dec!(5818),
                first_rate: dec!(0.20),
                second_threshold: dec!(7446),
                second_rate: dec!(0.36),
            },
            health_premium: vec![
                band(dec!(20000), Decimal::ZERO, dec!(0.06), dec!(300)),
                band(dec!(36000), dec!(300), dec!(0.06), dec!(450)),
                band(dec!(48000), dec!(450), dec!(0.25), dec!(600)),
                band(dec!(72000), dec!(600), dec!(0.25), dec!(750)),
                band(dec!(200000), dec!(750), dec!(0.25), dec!(900)),
            ],
            tax_reduction_base: dec!(300),
        },
        cpp: CppSchedule {
            basic_exemption: dec!(3500),
            first_ceiling: dec!(74600),
            first_rate: dec!(0.0595),
            second_ceiling: dec!(85000),
            second_rate: dec!(0.04),
        },
        ei: EiSchedule {
            rate: dec!(0.0163),
            max_insurable_earnings: dec!(68900),
        },
    }
}

fn band(
    from: Decimal,
    base: Decimal,
    rate: Decimal,
    max: Decimal,
) -> HealthPremiumBand {
    HealthPremiumBand {
        from,
        base,
        rate,
        max,
    }
}
