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

/*!
Factores de paso (weighting factors)
====================================

Define el tipo Factors (lista de factores de paso + metadatos) y la definición de
factores de usuario.

```text
#META CTE_FUENTE: RITE2014
vector, fuente, uso, step, ren, nren
ELECTRICIDAD, grid, input, A, 0.341, 2.082 # Recursos usados para suministrar electricidad
```
*/

use std::fmt;
use std::str;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{
    error::{EpbdError, Result},
    rennren::RenNren,
    types::{is_data_line, is_meta_line, Carrier, Dest, Factor, Meta, MetaVec, Source, Step},
};

/// Lista de factores de paso con sus metadatos
///
/// List of weighting factors bundled with its metadata
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Factors {
    /// Metadata
    pub wmeta: Vec<Meta>,
    /// Weighting factors list
    pub wdata: Vec<Factor>,
}

impl Factors {
    /// Localiza el factor de paso de un vector, fuente, uso y paso de cálculo
    ///
    /// Find the weighting factor for `carrier`, `source`, `dest` and `step`.
    /// The first matching row wins.
    ///
    /// # Errors
    ///
    /// * No row for the requested combination. Missing factors are never defaulted.
    pub fn find(&self, carrier: Carrier, source: Source, dest: Dest, step: Step) -> Result<RenNren> {
        self.wdata
            .iter()
            .find(|f| f.matches(carrier, source, dest, step))
            .map(|f| f.factors)
            .ok_or_else(|| {
                EpbdError::MissingFactor(format!(
                    "'{}, {}, {}, {}'",
                    carrier, source, dest, step
                ))
            })
    }

    /// Actualiza o establece valores de un factor de paso
    pub fn update_wfactor(
        &mut self,
        carrier: Carrier,
        source: Source,
        dest: Dest,
        step: Step,
        values: RenNren,
        comment: &str,
    ) {
        if let Some(factor) = self
            .wdata
            .iter_mut()
            .find(|f| f.matches(carrier, source, dest, step))
        {
            factor.factors = values;
            factor.comment = comment.to_string();
        } else {
            self.wdata
                .push(Factor::new(carrier, source, dest, step, values, comment));
        };
    }

    /// Actualiza los factores definibles por el usuario (cogen_to_grid, cogen_to_nepb, red1 y red2)
    pub fn set_user_wfactors(mut self, user: UserWF<Option<RenNren>>) -> Self {
        use Carrier::{ELECTRICIDAD, RED1, RED2};
        use Dest::{input, to_grid, to_nEPB};
        use Source::{COGENERACION, GRID};
        use Step::A;

        [
            (ELECTRICIDAD, COGENERACION, to_grid, user.cogen_to_grid),
            (ELECTRICIDAD, COGENERACION, to_nEPB, user.cogen_to_nepb),
            (RED1, GRID, input, user.red1),
            (RED2, GRID, input, user.red2),
        ]
        .iter()
        .for_each(|(carrier, source, dest, uservalue)| {
            if let Some(value) = *uservalue {
                self.update_wfactor(*carrier, *source, *dest, A, value, "Factor de usuario")
            }
        });

        self
    }
}

impl MetaVec for Factors {
    fn get_metavec(&self) -> &Vec<Meta> {
        &self.wmeta
    }
    fn get_mut_metavec(&mut self) -> &mut Vec<Meta> {
        &mut self.wmeta
    }
}

impl fmt::Display for Factors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let metalines = self
            .wmeta
            .iter()
            .map(|v| format!("{}", v))
            .join("\n");
        let datalines = self
            .wdata
            .iter()
            .map(|v| format!("{}", v))
            .join("\n");
        write!(
            f,
            "{}\nvector, fuente, uso, step, ren, nren\n{}",
            metalines, datalines
        )
    }
}

impl str::FromStr for Factors {
    type Err = EpbdError;

    fn from_str(s: &str) -> Result<Factors> {
        let s_nobom = s.strip_prefix('\u{feff}').unwrap_or(s);
        let lines: Vec<&str> = s_nobom.lines().map(str::trim).collect();
        let wmeta = lines
            .iter()
            .filter(|l| is_meta_line(l))
            .map(|e| e.parse())
            .collect::<Result<Vec<Meta>>>()?;
        let wdata = lines
            .iter()
            .filter(|l| is_data_line(l))
            .map(|e| e.parse())
            .collect::<Result<Vec<Factor>>>()?;
        Ok(Factors { wmeta, wdata })
    }
}

/// Estructura para definir valores de factores de paso de usuario
///
/// User defined weighting factors
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UserWF<T = RenNren> {
    /// Factores de paso de redes de distrito 1.
    /// RED1, grid, input, A, ren, nren
    pub red1: T,
    /// Factores de paso de redes de distrito 2.
    /// RED2, grid, input, A, ren, nren
    pub red2: T,
    /// Factores de paso para exportación a la red (paso A) de electricidad cogenerada.
    /// ELECTRICIDAD, COGENERACION, to_grid, A, ren, nren
    pub cogen_to_grid: T,
    /// Factores de paso para exportación a usos no EPB (paso A) de electricidad cogenerada.
    /// ELECTRICIDAD, COGENERACION, to_nEPB, A, ren, nren
    pub cogen_to_nepb: T,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const TFACTORS1: &str = "#META CTE_FUENTE: RITE2014
vector, fuente, uso, step, ren, nren
ELECTRICIDAD, grid, input, A, 0.341, 2.082 # Recursos usados para suministrar electricidad (peninsular) desde la red
ELECTRICIDAD, INSITU, input, A, 1.000, 0.000 # Recursos usados para producir electricidad in situ";

    #[test]
    fn tfactors_roundtrip() {
        assert_eq!(
            format!("{}", TFACTORS1.parse::<Factors>().unwrap()),
            TFACTORS1
        );
    }

    #[test]
    fn tfactors_find() {
        let fp: Factors = TFACTORS1.parse().unwrap();
        assert_eq!(
            fp.find(Carrier::ELECTRICIDAD, Source::GRID, Dest::input, Step::A)
                .unwrap(),
            RenNren::new(0.341, 2.082)
        );
        let err = fp
            .find(Carrier::ELECTRICIDAD, Source::INSITU, Dest::to_grid, Step::B)
            .unwrap_err();
        assert!(matches!(err, EpbdError::MissingFactor(_)));
    }

    #[test]
    fn tfactors_malformed() {
        assert!("ELECTRICIDAD, nube, input, A, 0.3, 2.0"
            .parse::<Factors>()
            .is_err());
    }

    #[test]
    fn tfactors_user_wfactors() {
        let fp: Factors = TFACTORS1.parse().unwrap();
        let fp = fp.set_user_wfactors(UserWF {
            red1: Some(RenNren::new(0.0, 1.3)),
            red2: None,
            cogen_to_grid: Some(RenNren::new(0.0, 2.5)),
            cogen_to_nepb: None,
        });
        assert_eq!(fp.wdata.len(), 4);
        assert_eq!(
            fp.find(Carrier::RED1, Source::GRID, Dest::input, Step::A)
                .unwrap(),
            RenNren::new(0.0, 1.3)
        );
        assert!(fp
            .find(Carrier::RED2, Source::GRID, Dest::input, Step::A)
            .is_err());
        // Updating an existing factor does not add rows
        let fp = fp.set_user_wfactors(UserWF {
            cogen_to_grid: Some(RenNren::new(0.0, 1.0)),
            ..Default::default()
        });
        assert_eq!(fp.wdata.len(), 4);
        assert_eq!(
            fp.find(
                Carrier::ELECTRICIDAD,
                Source::COGENERACION,
                Dest::to_grid,
                Step::A
            )
            .unwrap(),
            RenNren::new(0.0, 1.0)
        );
    }
}
