//! AE amount denominations
//!
//! Amounts are carried as decimal strings so that fractions of a coin can be
//! expressed exactly. The smallest unit is the aetto, `1 AE = 10^18 aettos`.

use std::fmt;
use std::str::FromStr;

use num_bigint::BigUint;
use num_traits::Zero;

use crate::TxError;

/// Unit an amount is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Denomination {
    /// 1 AE
    Ae,
    /// 10^-3 AE
    MiliAe,
    /// 10^-6 AE
    MicroAe,
    /// 10^-9 AE
    NanoAe,
    /// 10^-12 AE
    PicoAe,
    /// 10^-15 AE
    FemtoAe,
    /// 10^-18 AE
    #[default]
    Aettos,
}

impl Denomination {
    /// Every denomination, largest first
    pub const ALL: [Denomination; 7] = [
        Denomination::Ae,
        Denomination::MiliAe,
        Denomination::MicroAe,
        Denomination::NanoAe,
        Denomination::PicoAe,
        Denomination::FemtoAe,
        Denomination::Aettos,
    ];

    /// Decimal exponent relative to one AE
    pub const fn magnitude(self) -> i32 {
        match self {
            Denomination::Ae => 0,
            Denomination::MiliAe => -3,
            Denomination::MicroAe => -6,
            Denomination::NanoAe => -9,
            Denomination::PicoAe => -12,
            Denomination::FemtoAe => -15,
            Denomination::Aettos => -18,
        }
    }

    /// Canonical name, e.g. `miliAE`
    pub const fn name(self) -> &'static str {
        match self {
            Denomination::Ae => "ae",
            Denomination::MiliAe => "miliAE",
            Denomination::MicroAe => "microAE",
            Denomination::NanoAe => "nanoAE",
            Denomination::PicoAe => "picoAE",
            Denomination::FemtoAe => "femtoAE",
            Denomination::Aettos => "aettos",
        }
    }
}

impl fmt::Display for Denomination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Denomination {
    type Err = TxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.name() == s)
            .ok_or_else(|| TxError::IllegalArgument(format!("Invalid denomination: {s}")))
    }
}

/// Exact decimal number `digits * 10^exponent`
struct Decimal {
    digits: BigUint,
    exponent: i64,
}

fn not_a_number(value: &str) -> TxError {
    TxError::IllegalArgument(format!("Value {value} is not type of number"))
}

fn parse_decimal(value: &str) -> Result<Decimal, TxError> {
    let trimmed = value.trim();
    let (mantissa, exp) = match trimmed.split_once(['e', 'E']) {
        Some((m, e)) => (m, e.parse::<i64>().map_err(|_| not_a_number(value))?),
        None => (trimmed, 0),
    };
    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if int_part.is_empty() && frac_part.is_empty() {
        return Err(not_a_number(value));
    }
    let all_digits = format!("{int_part}{frac_part}");
    if !all_digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(not_a_number(value));
    }
    let digits = BigUint::parse_bytes(all_digits.as_bytes(), 10).ok_or_else(|| not_a_number(value))?;
    Ok(Decimal {
        digits,
        exponent: exp - frac_part.len() as i64,
    })
}

fn pow10(exponent: u32) -> BigUint {
    num_traits::pow(BigUint::from(10u32), exponent as usize)
}

fn shift(value: Decimal, by: i64) -> Decimal {
    Decimal {
        digits: value.digits,
        exponent: value.exponent + by,
    }
}

fn render(value: &Decimal) -> String {
    if value.digits.is_zero() {
        return "0".to_string();
    }
    if value.exponent >= 0 {
        return (&value.digits * pow10(value.exponent as u32)).to_string();
    }
    let scale = value.exponent.unsigned_abs() as usize;
    let digits = value.digits.to_string();
    let padded = format!("{digits:0>width$}", width = scale + 1);
    let (int_part, frac_part) = padded.split_at(padded.len() - scale);
    let frac_part = frac_part.trim_end_matches('0');
    if frac_part.is_empty() {
        int_part.to_string()
    } else {
        format!("{int_part}.{frac_part}")
    }
}

/// Convert a decimal amount between denominations
pub fn format_amount(value: &str, from: Denomination, to: Denomination) -> Result<String, TxError> {
    let decimal = parse_decimal(value)?;
    let by = i64::from(from.magnitude() - to.magnitude());
    Ok(render(&shift(decimal, by)))
}

/// Convert an amount into whole aettos
///
/// Fails if the result is not an integer number of aettos.
pub fn to_aettos(value: &str, denomination: Denomination) -> Result<BigUint, TxError> {
    let by = i64::from(denomination.magnitude() - Denomination::Aettos.magnitude());
    let decimal = shift(parse_decimal(value)?, by);
    if decimal.exponent >= 0 {
        return Ok(decimal.digits * pow10(decimal.exponent as u32));
    }
    let divisor = pow10(decimal.exponent.unsigned_abs() as u32);
    if !(&decimal.digits % &divisor).is_zero() {
        return Err(TxError::IllegalArgument(format!(
            "{value} {denomination} is not a whole number of aettos"
        )));
    }
    Ok(decimal.digits / divisor)
}

/// Convert an amount of aettos into AE
pub fn to_ae(aettos: &BigUint) -> String {
    let decimal = Decimal {
        digits: aettos.clone(),
        exponent: 0,
    };
    render(&shift(decimal, i64::from(Denomination::Aettos.magnitude())))
}

/// One AE in aettos
pub fn one_ae() -> BigUint {
    pow10(18)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_aettos() {
        assert_eq!(to_aettos("1", Denomination::Ae).unwrap(), one_ae());
        assert_eq!(
            to_aettos("10012312", Denomination::Ae).unwrap(),
            BigUint::from(10012312u64) * one_ae()
        );
        assert_eq!(to_aettos("1", Denomination::Aettos).unwrap(), BigUint::from(1u32));
        assert_eq!(
            to_aettos("1.5", Denomination::Ae).unwrap(),
            BigUint::from(1_500_000_000_000_000_000u64)
        );
        assert_eq!(
            to_aettos("1e-12", Denomination::MicroAe).unwrap(),
            BigUint::from(1u32)
        );
    }

    #[test]
    fn test_fraction_of_aetto_rejected() {
        assert!(to_aettos("0.5", Denomination::Aettos).is_err());
    }

    #[test]
    fn test_format_amount() {
        let cases = [
            ("10", Denomination::Aettos, Denomination::Ae, "0.00000000000000001"),
            ("1000000000000000000", Denomination::Aettos, Denomination::Ae, "1"),
            ("1", Denomination::PicoAe, Denomination::Ae, "0.000000000001"),
            ("1", Denomination::PicoAe, Denomination::Aettos, "1000000"),
            ("1000000", Denomination::Aettos, Denomination::PicoAe, "1"),
            ("0.0001", Denomination::PicoAe, Denomination::Ae, "0.0000000000000001"),
            ("0.000001", Denomination::MicroAe, Denomination::PicoAe, "1"),
            ("1", Denomination::MiliAe, Denomination::Aettos, "1000000000000000"),
            ("1", Denomination::Ae, Denomination::MiliAe, "1000"),
            ("1", Denomination::NanoAe, Denomination::FemtoAe, "1000000"),
            ("1", Denomination::Ae, Denomination::Ae, "1"),
        ];
        for (value, from, to, expected) in cases {
            assert_eq!(format_amount(value, from, to).unwrap(), expected, "{value} {from} -> {to}");
        }
    }

    #[test]
    fn test_invalid_value() {
        let err = format_amount("abc", Denomination::Ae, Denomination::Ae).unwrap_err();
        assert_eq!(err.to_string(), "Value abc is not type of number");
        assert!(format_amount("-1", Denomination::Ae, Denomination::Ae).is_err());
        assert!(format_amount(".", Denomination::Ae, Denomination::Ae).is_err());
    }

    #[test]
    fn test_denomination_names() {
        assert_eq!("miliAE".parse::<Denomination>().unwrap(), Denomination::MiliAe);
        let err = "ASD".parse::<Denomination>().unwrap_err();
        assert_eq!(err.to_string(), "Invalid denomination: ASD");
        assert_eq!(Denomination::default(), Denomination::Aettos);
    }

    #[test]
    fn test_to_ae() {
        assert_eq!(to_ae(&BigUint::from(10u32)), "0.00000000000000001");
        assert_eq!(to_ae(&one_ae()), "1");
    }
}
