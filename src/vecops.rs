// Copyright (c) 2018-2022  Ministerio de Fomento
//                          Instituto de Ciencias de la Construcción Eduardo Torroja (IETcc-CSIC)

// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:

// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

// Author(s): Rafael Villar Burke <pachi@ietcc.csic.es>,
//            Daniel Jiménez González <dani@ietcc.csic.es>,
//            Marta Sorribes Gil <msorribes@ietcc.csic.es>

// -----------------------------------------------------------------------------------
// NaN aware aggregation utilities
// -----------------------------------------------------------------------------------

use num::Float;

// Sum of all elements, skipping NaN values. An empty list sums to zero.
pub fn nansum<T: Float>(vec: &[T]) -> T {
    vec.iter()
        .filter(|v| !v.is_nan())
        .fold(T::zero(), |acc, &v| acc + v)
}

// Mean of all non NaN elements, NaN when there are none
pub fn nanmean<T: Float>(vec: &[T]) -> T {
    let valid: Vec<T> = vec.iter().cloned().filter(|v| !v.is_nan()).collect();
    if valid.is_empty() {
        return T::nan();
    }
    let n = T::from(valid.len()).unwrap_or_else(T::nan);
    nansum(&valid) / n
}

// Weighted average of (value, weight) pairs
//
// Pairs with a NaN value are left out of both the numerator and the denominator.
// Returns NaN when no pair remains or the remaining weights add up to zero.
pub fn weighted_average<T: Float>(pairs: &[(T, T)]) -> T {
    let valid = pairs.iter().filter(|(v, _)| !v.is_nan());
    let (num, den) = valid.fold((T::zero(), T::zero()), |(num, den), &(v, w)| {
        (num + v * w, den + w)
    });
    if den == T::zero() || den.is_nan() {
        T::nan()
    } else {
        num / den
    }
}

// Round to the given number of decimals (at most 15)
pub fn round_to<T: Float>(value: T, decimals: u32) -> T {
    let factor = T::from(10_f64.powi(decimals.min(15) as i32)).unwrap_or_else(T::one);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vecops_nansum() {
        assert_eq!(9.0, nansum(&[2.0, 3.0, 4.0]));
        assert_eq!(5.0, nansum(&[2.0, std::f64::NAN, 3.0]));
        assert_eq!(0.0, nansum::<f64>(&[]));
        assert_eq!(0.0, nansum(&[std::f64::NAN]));
    }

    #[test]
    fn vecops_nanmean() {
        assert_eq!(3.0, nanmean(&[2.0, std::f64::NAN, 4.0]));
        assert!(nanmean::<f64>(&[]).is_nan());
        assert!(nanmean(&[std::f64::NAN, std::f64::NAN]).is_nan());
    }

    #[test]
    fn vecops_weighted_average() {
        assert_eq!(
            (10.0 * 1.0 + 20.0 * 3.0) / 4.0,
            weighted_average(&[(10.0, 1.0), (20.0, 3.0)])
        );
        // NaN values are dropped from numerator and denominator
        assert_eq!(20.0, weighted_average(&[(std::f64::NAN, 5.0), (20.0, 3.0)]));
        assert!(weighted_average(&[(10.0, 0.0), (20.0, 0.0)]).is_nan());
        assert!(weighted_average::<f64>(&[]).is_nan());
    }

    #[test]
    fn vecops_round_to() {
        assert_eq!(1.23, round_to(1.234_f64, 2));
        assert_eq!(2.0, round_to(1.5_f64, 0));
        assert_eq!(0.25, round_to(0.25_f64, 400));
        assert_eq!(0.25, round_to(0.25_f64, std::u32::MAX));
    }
}
