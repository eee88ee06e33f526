use crate::{SdkError, SdkResult};

/// Divmod with JavaScript `BigNumber` semantics rather than Rust's native
/// ones: the quotient truncates toward zero, and the remainder's magnitude
/// is `|dividend| % |divisor|`, negated when the operand signs differ.
///
/// Needed when mirroring on-chain math performed by JS tooling, where
/// `divmod(-7, 2)` and `divmod(7, -2)` both yield `(-3, -1)`.
pub fn divmod_js_bignumber(dividend: i128, divisor: i128) -> SdkResult<(i128, i128)> {
    if divisor == 0 {
        return Err(SdkError::DivisionByZero);
    }

    let quotient = dividend / divisor; // Rust integer division truncates toward zero
    let mut remainder = (dividend % divisor).abs();
    if (dividend < 0) != (divisor < 0) {
        remainder = -remainder;
    }

    Ok((quotient, remainder))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_dividend() {
        assert_eq!(divmod_js_bignumber(-7, 2).unwrap(), (-3, -1));
    }

    #[test]
    fn test_negative_divisor() {
        assert_eq!(divmod_js_bignumber(7, -2).unwrap(), (-3, -1));
    }

    #[test]
    fn test_both_positive() {
        assert_eq!(divmod_js_bignumber(7, 2).unwrap(), (3, 1));
    }

    #[test]
    fn test_exact_division() {
        assert_eq!(divmod_js_bignumber(-8, 2).unwrap(), (-4, 0));
    }

    #[test]
    fn test_division_by_zero() {
        assert!(matches!(
            divmod_js_bignumber(1, 0),
            Err(SdkError::DivisionByZero)
        ));
    }
}
