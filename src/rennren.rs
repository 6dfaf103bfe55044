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

use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EpbdError;

/// Energy pairs representing renewable and non renewable energy quantities or factors.
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RenNren {
    /// Renewable energy or factor
    pub ren: f64,
    /// Non Renewable energy or factor
    pub nren: f64,
}

impl RenNren {
    /// Constructor
    pub fn new(ren: f64, nren: f64) -> Self {
        Self { ren, nren }
    }

    /// Total renewable + non renewable energy
    pub fn tot(&self) -> f64 {
        self.ren + self.nren
    }

    /// Renewable energy ratio
    pub fn rer(&self) -> f64 {
        let tot = self.tot();
        if tot == 0.0 {
            0.0
        } else {
            self.ren / tot
        }
    }
}

impl fmt::Display for RenNren {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{ ren: {:.3}, nren: {:.3} }}", self.ren, self.nren)
    }
}

impl From<(f64, f64)> for RenNren {
    fn from((ren, nren): (f64, f64)) -> Self {
        Self { ren, nren }
    }
}

/// Lectura de pares "ren, nren" (p.e. en metadatos: "#META CTE_COGEN: 0.0, 2.5")
impl FromStr for RenNren {
    type Err = EpbdError;

    fn from_str(s: &str) -> Result<RenNren, Self::Err> {
        let vals = s
            .split(',')
            .map(|v| v.trim().parse::<f64>())
            .collect::<Result<Vec<f64>, _>>()?;
        match vals.as_slice() {
            [ren, nren] => Ok(RenNren::new(*ren, *nren)),
            _ => Err(EpbdError::MalformedInput(format!(
                "se esperaba un par de valores ren, nren y se encontró `{}`",
                s
            ))),
        }
    }
}

// Implement addition
impl Add for RenNren {
    type Output = RenNren;

    fn add(self, other: RenNren) -> RenNren {
        RenNren {
            ren: self.ren + other.ren,
            nren: self.nren + other.nren,
        }
    }
}

impl<'a> Add for &'a RenNren {
    type Output = RenNren;

    fn add(self, other: &RenNren) -> RenNren {
        RenNren {
            ren: self.ren + other.ren,
            nren: self.nren + other.nren,
        }
    }
}

impl AddAssign for RenNren {
    fn add_assign(&mut self, other: RenNren) {
        self.ren += other.ren;
        self.nren += other.nren;
    }
}

// Implement substraction
impl Sub for RenNren {
    type Output = RenNren;

    fn sub(self, other: RenNren) -> RenNren {
        RenNren {
            ren: self.ren - other.ren,
            nren: self.nren - other.nren,
        }
    }
}

impl<'a> Sub for &'a RenNren {
    type Output = RenNren;

    fn sub(self, other: &RenNren) -> RenNren {
        RenNren {
            ren: self.ren - other.ren,
            nren: self.nren - other.nren,
        }
    }
}

// rennren * f64
impl Mul<f64> for RenNren {
    type Output = RenNren;

    fn mul(self, rhs: f64) -> RenNren {
        RenNren {
            ren: self.ren * rhs,
            nren: self.nren * rhs,
        }
    }
}

// f64 * rennren
impl Mul<RenNren> for f64 {
    type Output = RenNren;

    fn mul(self, rhs: RenNren) -> RenNren {
        RenNren {
            ren: self * rhs.ren,
            nren: self * rhs.nren,
        }
    }
}

// f64 * &rennren
impl<'a> Mul<&'a RenNren> for f64 {
    type Output = RenNren;

    fn mul(self, rhs: &RenNren) -> RenNren {
        RenNren {
            ren: self * rhs.ren,
            nren: self * rhs.nren,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn rennren_ops() {
        assert_eq!(
            RenNren::new(3.0, 3.0),
            RenNren::new(1.0, 0.0) + RenNren::new(2.0, 3.0)
        );
        assert_eq!(
            RenNren::new(-1.0, -3.0),
            RenNren::new(1.0, 0.0) - RenNren::new(2.0, 3.0)
        );
        assert_eq!(RenNren::new(2.0, 4.0), 2.0 * RenNren::new(1.0, 2.0));
        let mut acc = RenNren::default();
        acc += RenNren::new(1.5, 0.5);
        acc += RenNren::new(0.5, 0.5);
        assert_eq!(RenNren::new(2.0, 1.0), acc);
        assert_eq!(
            format!("{}", RenNren::new(1.0, 0.0)),
            "{ ren: 1.000, nren: 0.000 }"
        );
    }

    #[test]
    fn rennren_tot_rer() {
        let v = RenNren::new(1.0, 3.0);
        assert_eq!(4.0, v.tot());
        assert_eq!(0.25, v.rer());
        assert_eq!(0.0, RenNren::default().rer());
    }

    #[test]
    fn rennren_parse() {
        assert_eq!(RenNren::new(0.0, 2.5), "0.0, 2.5".parse::<RenNren>().unwrap());
        assert!("1.0".parse::<RenNren>().is_err());
        assert!("a, b".parse::<RenNren>().is_err());
    }
}
