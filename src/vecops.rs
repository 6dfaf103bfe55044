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

//! Operaciones elementales sobre vectores
//!
//! Vector utilities. All binary operations work on sequences of equal length. A length
//! mismatch is a programming error and is only checked in debug builds.

use num::{Float, Zero};

/// Elementwise sum res[i] = vec1[i] + vec2[i] + ... + vecj[i]
///
/// An empty list gives an empty vector.
pub fn veclistsum<T: Float>(veclist: &[&[T]]) -> Vec<T> {
    let len = match veclist.first() {
        Some(first) => first.len(),
        None => return Vec::new(),
    };
    debug_assert!(veclist.iter().all(|v| v.len() == len));
    veclist.iter().fold(vec![Zero::zero(); len], |acc, x| vecvecsum(&acc, x))
}

/// Elementwise minimum res[i] = min(vec1[i], vec2[i])
pub fn vecvecmin<T: Float>(vec1: &[T], vec2: &[T]) -> Vec<T> {
    debug_assert_eq!(vec1.len(), vec2.len());
    vec1.iter().zip(vec2).map(|(a, b)| a.min(*b)).collect()
}

/// Elementwise sum res[i] = vec1[i] + vec2[i]
pub fn vecvecsum<T: Float>(vec1: &[T], vec2: &[T]) -> Vec<T> {
    debug_assert_eq!(vec1.len(), vec2.len());
    vec1.iter().zip(vec2).map(|(a, b)| *a + *b).collect()
}

/// Elementwise difference res[i] = vec1[i] - vec2[i]
pub fn vecvecdif<T: Float>(vec1: &[T], vec2: &[T]) -> Vec<T> {
    debug_assert_eq!(vec1.len(), vec2.len());
    vec1.iter().zip(vec2).map(|(a, b)| *a - *b).collect()
}

/// Elementwise multiplication res[i] = vec1[i] * vec2[i]
pub fn vecvecmul<T: Float>(vec1: &[T], vec2: &[T]) -> Vec<T> {
    debug_assert_eq!(vec1.len(), vec2.len());
    vec1.iter().zip(vec2).map(|(a, b)| *a * *b).collect()
}

/// Elementwise safe division res[i] = vec1[i] / vec2[i], 0 where vec2[i] == 0
pub fn vecvecratio<T: Float>(vec1: &[T], vec2: &[T]) -> Vec<T> {
    debug_assert_eq!(vec1.len(), vec2.len());
    vec1.iter().zip(vec2).map(|(a, b)| safe_ratio(*a, *b)).collect()
}

/// Multiply vector by scalar
pub fn veckmul<T: Float>(vec1: &[T], k: T) -> Vec<T> {
    vec1.iter().map(|el| *el * k).collect()
}

/// Sum all elements in a vector
pub fn vecsum<T: Float>(vec: &[T]) -> T {
    vec.iter().fold(Zero::zero(), |acc, x| acc + *x)
}

/// Division that resolves to zero when the denominator is zero
pub fn safe_ratio<T: Float>(num: T, den: T) -> T {
    if den == Zero::zero() {
        Zero::zero()
    } else {
        num / den
    }
}
